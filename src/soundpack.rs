use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_DIR: &str = "~/.claude/sounds";

#[derive(Debug, thiserror::Error)]
pub enum SoundPackError {
    #[error("read sound pack at {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse sound pack at {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("sound pack at {} is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

/// User-supplied description of event and hook sounds. Any JSON object is
/// accepted; fields of an unexpected shape read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoundPack {
    #[serde(rename = "$schema", default, deserialize_with = "lenient")]
    pub schema: Option<String>,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(rename = "baseDir", default, deserialize_with = "lenient")]
    pub base_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub opencode: Option<OpencodeSection>,
    /// Claude Code hook type -> matcher -> sound. Only read by
    /// [`generate_claude_hooks`].
    #[serde(default)]
    pub claude: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpencodeSection {
    #[serde(default, deserialize_with = "lenient")]
    pub events: Option<BTreeMap<String, SoundEntry>>,
    #[serde(default, deserialize_with = "lenient")]
    pub hooks: Option<BTreeMap<String, SoundEntry>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// An unresolved reference to a sound file: either a bare string or an
/// object with a `path` field. Anything else parses but carries no path.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SoundEntry {
    Path(String),
    Object {
        #[serde(default)]
        path: Option<String>,
    },
    Other(IgnoredAny),
}

impl SoundEntry {
    pub fn raw_path(&self) -> Option<&str> {
        match self {
            SoundEntry::Path(path) => Some(path.as_str()),
            SoundEntry::Object { path } => path.as_deref(),
            SoundEntry::Other(_) => None,
        }
    }
}

impl From<&str> for SoundEntry {
    fn from(path: &str) -> Self {
        SoundEntry::Path(path.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedSoundPack {
    pub path: PathBuf,
    pub pack: SoundPack,
}

impl SoundPack {
    pub fn load(path: &Path) -> Result<Self, SoundPackError> {
        let raw = fs::read_to_string(path).map_err(|source| SoundPackError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &raw)
    }

    pub fn parse(path: &Path, raw: &str) -> Result<Self, SoundPackError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| SoundPackError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !value.is_object() {
            return Err(SoundPackError::NotAnObject {
                path: path.to_path_buf(),
            });
        }
        serde_json::from_value(value).map_err(|source| SoundPackError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The declared base directory, or the default when absent or empty.
    pub fn base_dir(&self) -> &str {
        match self.base_dir.as_deref() {
            Some(dir) if !dir.is_empty() => dir,
            _ => DEFAULT_BASE_DIR,
        }
    }

    pub fn opencode_events(&self) -> impl Iterator<Item = (&String, &SoundEntry)> {
        self.opencode
            .as_ref()
            .and_then(|section| section.events.as_ref())
            .into_iter()
            .flatten()
    }

    pub fn opencode_hooks(&self) -> impl Iterator<Item = (&String, &SoundEntry)> {
        self.opencode
            .as_ref()
            .and_then(|section| section.hooks.as_ref())
            .into_iter()
            .flatten()
    }
}

/// Returns the first candidate that parses as a sound pack. Missing or
/// malformed candidates are skipped.
pub fn load_from_paths(candidates: &[PathBuf]) -> Option<LoadedSoundPack> {
    for path in candidates {
        match SoundPack::load(path) {
            Ok(pack) => {
                tracing::debug!(path = %path.display(), "loaded sound pack");
                return Some(LoadedSoundPack {
                    path: path.clone(),
                    pack,
                });
            }
            Err(SoundPackError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                continue;
            }
            Err(err) => {
                tracing::debug!(error = ?err, "skipping sound pack candidate");
            }
        }
    }

    None
}

/// Resolves an entry against `base_dir`. Absolute and `~` paths are kept
/// verbatim; empty entries resolve to `None`.
pub fn normalize_path(base_dir: &str, entry: &SoundEntry) -> Option<String> {
    let raw = entry.raw_path().unwrap_or("");
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with('/') || raw.starts_with('~') {
        return Some(raw.to_string());
    }

    let base = base_dir.trim_end_matches('/');
    Some(format!("{base}/{raw}"))
}

/// Expands a leading `~/` against `home`.
pub fn expand_home(path: &str, home: &Path) -> Option<String> {
    let rest = path.strip_prefix("~/")?;
    let home = home.to_string_lossy();
    let home = home.trim_end_matches('/');
    Some(format!("{home}/{rest}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaudeHookMatcher {
    pub matcher: String,
    pub hooks: Vec<ClaudeHookCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaudeHookCommand {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
}

/// Builds a Claude Code `hooks` settings object from the pack's `claude`
/// section, one `afplay` command per matcher.
pub fn generate_claude_hooks(pack: &SoundPack) -> BTreeMap<String, Vec<ClaudeHookMatcher>> {
    let base_dir = pack.base_dir();
    let mut hooks = BTreeMap::new();

    let sections = match pack.claude.as_ref().and_then(Value::as_object) {
        Some(sections) => sections,
        None => return hooks,
    };

    for (hook_type, matchers) in sections {
        let matchers = match matchers.as_object() {
            Some(matchers) => matchers,
            None => continue,
        };

        let mut entries = Vec::new();
        for (matcher, entry) in matchers {
            let entry = match SoundEntry::deserialize(entry) {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let full_path = match normalize_path(base_dir, &entry) {
                Some(path) => path,
                None => continue,
            };
            let quoted = if full_path.contains(' ') {
                format!("\"{full_path}\"")
            } else {
                full_path
            };

            entries.push(ClaudeHookMatcher {
                matcher: matcher.clone(),
                hooks: vec![ClaudeHookCommand {
                    kind: "command".to_string(),
                    command: format!("afplay {quoted} &"),
                }],
            });
        }

        if !entries.is_empty() {
            hooks.insert(hook_type.clone(), entries);
        }
    }

    hooks
}
