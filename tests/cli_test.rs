use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn clod_sfx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clod-sfx").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .arg("--root")
        .arg(home);
    cmd
}

#[test]
fn notify_default_config_plays_mew() {
    let home = TempDir::new().unwrap();

    clod_sfx(home.path())
        .args(["notify", "--dry-run", r#"{"type":"session.idle"}"#])
        .assert()
        .success()
        .stdout("mew.wav\n");
}

#[test]
fn notify_unconfigured_hook_is_silent() {
    let home = TempDir::new().unwrap();

    clod_sfx(home.path())
        .args(["notify", "--dry-run", "--hook", "permission.ask"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn notify_claude_stop_uses_session_idle() {
    let home = TempDir::new().unwrap();

    clod_sfx(home.path())
        .args(["notify", "--source", "claude", "--dry-run"])
        .write_stdin(r#"{"hook_event_name":"Stop"}"#)
        .assert()
        .success()
        .stdout("mew.wav\n");
}

#[test]
fn notify_malformed_payload_still_succeeds() {
    let home = TempDir::new().unwrap();

    clod_sfx(home.path())
        .args(["notify", "--dry-run", "{oops"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn notify_with_missing_player_succeeds() {
    let home = TempDir::new().unwrap();

    clod_sfx(home.path())
        .args(["notify", "--player", "/nonexistent/clod", "--event", "session.idle"])
        .assert()
        .success();
}

#[test]
fn config_show_prints_resolved_pack() {
    let home = TempDir::new().unwrap();
    let global = home.path().join(".claude");
    fs::create_dir_all(&global).unwrap();
    fs::write(
        global.join("soundpack.json"),
        r#"{"baseDir":"/snd","opencode":{"hooks":{"chat.message":"chat.wav"}}}"#,
    )
    .unwrap();

    clod_sfx(home.path())
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""chat.message": "/snd/chat.wav""#))
        .stdout(predicate::str::contains("session.idle").not());
}

#[test]
fn config_reports_missing_pack() {
    let home = TempDir::new().unwrap();

    clod_sfx(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("no sound pack found"));
}

#[test]
fn claude_hooks_prints_generated_hooks() {
    let home = TempDir::new().unwrap();
    let project = home.path().join(".opencode");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("soundpack.json"),
        r#"{"claude":{"Stop":{"*":"done.wav"}}}"#,
    )
    .unwrap();

    clod_sfx(home.path())
        .arg("claude-hooks")
        .assert()
        .success()
        .stdout(predicate::str::contains("afplay ~/.claude/sounds/done.wav &"));
}

#[test]
fn fix_paths_rewrites_given_file() {
    let home = TempDir::new().unwrap();
    let settings = home.path().join("settings.json");
    fs::write(&settings, r#"{"command":"/abs/project/hook.py"}"#).unwrap();

    clod_sfx(home.path())
        .args(["fix-paths", "--from", "/abs/project/", "--to", "./"])
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 replacement(s)"));

    assert_eq!(
        fs::read_to_string(&settings).unwrap(),
        r#"{"command":"./hook.py"}"#
    );
}
