use crate::config::AppContext;
use anyhow::{bail, Context};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    Missing,
    Unchanged,
    Patched { replacements: usize, backup: PathBuf },
}

/// Claude Code settings files that may carry absolute paths.
pub fn default_settings_files(ctx: &AppContext) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Some(home) = ctx.home() {
        files.push(home.join(".claude").join("settings.json"));
    }
    let project = ctx.root.join(".claude");
    files.push(project.join("settings.json"));
    files.push(project.join("settings.local.json"));
    files
}

/// Replaces every literal occurrence of `from` with `to`. The original is
/// copied to a timestamped backup before the file is rewritten, and the
/// result must still be valid JSON.
pub fn fix_paths(path: &Path, from: &str, to: &str) -> anyhow::Result<FixOutcome> {
    if from.is_empty() {
        bail!("path to replace must not be empty");
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(FixOutcome::Missing),
        Err(err) => {
            return Err(err).with_context(|| format!("read settings at {}", path.display()));
        }
    };

    let replacements = raw.matches(from).count();
    if replacements == 0 {
        return Ok(FixOutcome::Unchanged);
    }

    let patched = raw.replace(from, to);
    serde_json::from_str::<serde_json::Value>(&patched)
        .with_context(|| format!("patched settings at {} are not valid JSON", path.display()))?;

    let backup = write_backup(path, raw.as_bytes(), Local::now())?;
    atomic_write(path, patched.as_bytes())
        .with_context(|| format!("write settings at {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        backup = %backup.display(),
        replacements,
        "patched settings"
    );

    Ok(FixOutcome::Patched {
        replacements,
        backup,
    })
}

pub fn backup_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "settings.json".to_string());
    path.with_file_name(format!("{name}.{}.bak", now.format("%Y%m%d%H%M%S")))
}

/// Writes `data` next to `path` under a fresh backup name. An existing
/// backup is never overwritten; a counter is appended instead.
fn write_backup(path: &Path, data: &[u8], now: DateTime<Local>) -> anyhow::Result<PathBuf> {
    let first = backup_path(path, now);
    let mut candidate = first.clone();
    let mut attempt = 1;
    loop {
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut file) => {
                file.write_all(data)
                    .with_context(|| format!("write backup {}", candidate.display()))?;
                return Ok(candidate);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                let stem = first.with_extension("");
                candidate = PathBuf::from(format!("{}.{attempt}.bak", stem.display()));
                attempt += 1;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("create backup {}", candidate.display()));
            }
        }
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent).context("create temp file")?;
    tmp.write_all(data).context("write temp file")?;
    let permissions = fs::metadata(path).context("read settings permissions")?.permissions();
    tmp.as_file()
        .set_permissions(permissions)
        .context("copy settings permissions")?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
