use clod_sfx::settings::{backup_path, fix_paths, FixOutcome};
use chrono::{Local, TimeZone};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SETTINGS: &str = r#"{
  "hooks": {
    "PostToolUse": [
      {"matcher": "Write", "hooks": [{"type": "command", "command": "/work/project/.claude/hooks/post_write_lint.py"}]}
    ]
  }
}"#;

#[test]
fn patches_absolute_path_and_keeps_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, SETTINGS).unwrap();

    let outcome = fix_paths(&path, "/work/project/.claude/hooks/", ".claude/hooks/").unwrap();

    let backup = match outcome {
        FixOutcome::Patched {
            replacements,
            backup,
        } => {
            assert_eq!(replacements, 1);
            backup
        }
        other => panic!("unexpected outcome: {other:?}"),
    };

    assert_eq!(fs::read_to_string(&backup).unwrap(), SETTINGS);
    let patched = fs::read_to_string(&path).unwrap();
    assert!(patched.contains(r#""command": ".claude/hooks/post_write_lint.py""#));
    assert!(!patched.contains("/work/project"));
}

#[test]
fn file_without_path_is_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, SETTINGS).unwrap();

    let outcome = fix_paths(&path, "/elsewhere/", "./").unwrap();

    assert_eq!(outcome, FixOutcome::Unchanged);
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let outcome = fix_paths(&dir.path().join("settings.json"), "/a", "b").unwrap();
    assert_eq!(outcome, FixOutcome::Missing);
}

#[test]
fn invalid_result_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, SETTINGS).unwrap();

    let result = fix_paths(&path, "/work/project", "\"");

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn empty_search_string_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, SETTINGS).unwrap();
    assert!(fix_paths(&path, "", "x").is_err());
}

#[test]
fn backup_name_carries_timestamp() {
    let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 5, 7).unwrap();
    let backup = backup_path(Path::new("/tmp/settings.json"), now);
    assert_eq!(backup, Path::new("/tmp/settings.json.20261016090507.bak"));
}

#[cfg(unix)]
#[test]
fn patching_keeps_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, SETTINGS).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    fix_paths(&path, "/work/project/", "./").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}

#[test]
fn repeated_patches_keep_every_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, SETTINGS).unwrap();

    let mut backups = Vec::new();
    for (from, to) in [("/work/project/", "/tmp/project/"), ("/tmp/project/", "./")] {
        match fix_paths(&path, from, to).unwrap() {
            FixOutcome::Patched { backup, .. } => backups.push(backup),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_ne!(backups[0], backups[1]);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), SETTINGS);
    assert!(fs::read_to_string(&backups[1])
        .unwrap()
        .contains("/tmp/project/.claude/hooks/"));
}
