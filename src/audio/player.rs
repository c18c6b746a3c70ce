use std::process::{Command, Stdio};
use std::thread;

pub const DEFAULT_PLAYER_PROGRAM: &str = "clod";

/// Requests playback of a sound file. Implementations must return
/// immediately and never report failure to the caller.
pub trait Player: Send + Sync {
    fn play(&self, filename: &str);
}

/// Runs `<program> sfx play <filename>` detached with output suppressed.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command(&self, filename: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("sfx")
            .arg("play")
            .arg(filename)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Default for CommandPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_PROGRAM)
    }
}

impl Player for CommandPlayer {
    fn play(&self, filename: &str) {
        let mut child = match self.command(filename).spawn() {
            Ok(child) => child,
            Err(err) => {
                tracing::debug!(error = ?err, program = %self.program, "sound player failed to start");
                return;
            }
        };

        // Reap in the background so the caller never waits on playback.
        let filename = filename.to_string();
        thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::debug!(%status, %filename, "sound player exited with failure");
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(error = ?err, %filename, "sound player wait failed");
            }
        });
    }
}

/// Prints the filename instead of playing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintPlayer;

impl Player for PrintPlayer {
    fn play(&self, filename: &str) {
        println!("{filename}");
    }
}
