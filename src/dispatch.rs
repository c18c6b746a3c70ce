use crate::audio::Player;
use crate::config::ResolvedSoundConfig;
use crate::events::{Hook, Invocation};
use crate::soundpack::{self, DEFAULT_BASE_DIR};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Maps incoming events and hooks to playback requests. Stateless apart
/// from the shared, read-only configuration.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<ResolvedSoundConfig>,
    player: Arc<dyn Player>,
    home: Option<PathBuf>,
}

impl Dispatcher {
    pub fn new(
        config: Arc<ResolvedSoundConfig>,
        player: Arc<dyn Player>,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            player,
            home,
        }
    }

    pub fn config(&self) -> &ResolvedSoundConfig {
        &self.config
    }

    /// Returns whether a playback request was issued.
    pub fn dispatch(&self, invocation: &Invocation) -> bool {
        match invocation {
            Invocation::Event(event_type) => self.on_event(event_type),
            Invocation::Hook(hook) => self.on_hook(*hook),
        }
    }

    pub fn on_event(&self, event_type: &str) -> bool {
        match self.config.event_sound(event_type) {
            Some(path) => self.play_path(path),
            None => false,
        }
    }

    pub fn on_hook(&self, hook: Hook) -> bool {
        match self.config.hook_sound(hook) {
            Some(path) => self.play_path(path),
            None => false,
        }
    }

    fn play_path(&self, path: &str) -> bool {
        let filename = match playback_filename(path, self.home.as_deref()) {
            Some(filename) => filename,
            None => {
                tracing::debug!(path, "sound path has no filename; skipping");
                return false;
            }
        };

        tracing::debug!(path, filename = %filename, "playing sound");
        self.player.play(&filename);
        true
    }
}

/// The name the player is invoked with: the path relative to the default
/// sound directory when it lives there, otherwise its final segment.
pub fn playback_filename(path: &str, home: Option<&Path>) -> Option<String> {
    let mut prefixes = vec![format!("{DEFAULT_BASE_DIR}/")];
    if let Some(expanded) = home.and_then(|home| soundpack::expand_home(DEFAULT_BASE_DIR, home)) {
        prefixes.push(format!("{expanded}/"));
    }

    let relative = prefixes
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix.as_str()))
        .filter(|rest| !rest.is_empty());

    let filename = match relative {
        Some(rest) => rest,
        None => path.rsplit('/').next().unwrap_or(""),
    };

    if filename.is_empty() {
        None
    } else {
        Some(filename.to_string())
    }
}
