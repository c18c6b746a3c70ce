use crate::events::Hook;
use crate::soundpack::{self, SoundPack, DEFAULT_BASE_DIR};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_SOUND: &str = "mew.wav";
pub const DEFAULT_EVENT: &str = "session.idle";
pub const SOUNDPACK_FILE: &str = "soundpack.json";

/// Locations handed to the plugin by the host runtime.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub root: PathBuf,
    pub config_dir: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl AppContext {
    pub fn new(root: PathBuf, config_dir: Option<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            root,
            config_dir,
            home,
        }
    }

    /// Fills anything not given explicitly from the process environment.
    pub fn detect(root: Option<PathBuf>, config_dir: Option<PathBuf>) -> Self {
        let base = BaseDirs::new();
        let root = root
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let config_dir = config_dir.or_else(|| {
            base.as_ref()
                .map(|base| base.config_dir().join("opencode"))
        });
        let home = base.as_ref().map(|base| base.home_dir().to_path_buf());

        Self::new(root, config_dir, home)
    }

    /// Project pack, then user config pack, then the global pack.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.root.join(".opencode").join(SOUNDPACK_FILE)];
        if let Some(dir) = &self.config_dir {
            paths.push(dir.join(SOUNDPACK_FILE));
        }
        if let Some(home) = &self.home {
            paths.push(home.join(".claude").join(SOUNDPACK_FILE));
        }
        paths
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }
}

/// Event and hook sounds after merging the pack with built-in defaults.
/// Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSoundConfig {
    pub events: BTreeMap<String, String>,
    pub hooks: BTreeMap<String, String>,
}

impl ResolvedSoundConfig {
    pub fn load(ctx: &AppContext) -> Self {
        Self::resolve(&ctx.candidate_paths())
    }

    pub fn resolve(candidates: &[PathBuf]) -> Self {
        let loaded = soundpack::load_from_paths(candidates);
        if loaded.is_none() {
            tracing::debug!("no sound pack found; using defaults");
        }
        Self::from_pack(loaded.as_ref().map(|loaded| &loaded.pack))
    }

    pub fn from_pack(pack: Option<&SoundPack>) -> Self {
        let mut events = BTreeMap::new();
        let mut hooks = BTreeMap::new();

        if let Some(pack) = pack {
            let base_dir = pack.base_dir();
            for (key, entry) in pack.opencode_events() {
                if let Some(path) = soundpack::normalize_path(base_dir, entry) {
                    events.insert(key.clone(), path);
                }
            }
            for (key, entry) in pack.opencode_hooks() {
                if let Some(path) = soundpack::normalize_path(base_dir, entry) {
                    hooks.insert(key.clone(), path);
                }
            }
        }

        if events.is_empty() && hooks.is_empty() {
            events.insert(DEFAULT_EVENT.to_string(), Self::default_sound_path());
        }

        Self { events, hooks }
    }

    pub fn default_sound_path() -> String {
        format!("{DEFAULT_BASE_DIR}/{DEFAULT_SOUND}")
    }

    pub fn event_sound(&self, event_type: &str) -> Option<&str> {
        self.events
            .get(event_type)
            .map(String::as_str)
            .filter(|path| !path.is_empty())
    }

    pub fn hook_sound(&self, hook: Hook) -> Option<&str> {
        self.hooks
            .get(hook.as_str())
            .map(String::as_str)
            .filter(|path| !path.is_empty())
    }
}

impl Default for ResolvedSoundConfig {
    fn default() -> Self {
        Self::from_pack(None)
    }
}
