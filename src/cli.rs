use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::audio::player::DEFAULT_PLAYER_PROGRAM;
use crate::events::{Hook, Source};

#[derive(Parser, Debug)]
#[command(name = "clod-sfx", version, about = "Sound effects for editor and agent lifecycle events")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, value_name = "DIR", help = "Project root (defaults to the current directory)")]
    pub root: Option<PathBuf>,

    #[arg(long, global = true, value_name = "DIR", help = "User config directory holding soundpack.json")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Notify(NotifyArgs),
    Config(ConfigArgs),
    ClaudeHooks,
    FixPaths(FixPathsArgs),
}

#[derive(Args, Debug)]
pub struct NotifyArgs {
    #[arg(long, value_enum, default_value = "opencode", help = "Host that delivered the event")]
    pub source: Source,

    #[arg(long, value_name = "TYPE", conflicts_with = "hook", help = "Explicit event type")]
    pub event: Option<String>,

    #[arg(long, value_enum, help = "Explicit hook name")]
    pub hook: Option<Hook>,

    #[arg(long, default_value = DEFAULT_PLAYER_PROGRAM, help = "Program invoked as `<player> sfx play <file>`")]
    pub player: String,

    #[arg(long, help = "Print the sound that would play instead of playing it")]
    pub dry_run: bool,

    #[arg(value_name = "JSON", help = "Event payload JSON (read from stdin when omitted)")]
    pub payload: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Show resolved sound config as JSON")]
    pub show: bool,

    #[arg(long, conflicts_with = "show", help = "List sound pack candidate paths")]
    pub paths: bool,
}

#[derive(Args, Debug)]
pub struct FixPathsArgs {
    #[arg(long, value_parser = NonEmptyStringValueParser::new(), help = "Absolute path to replace")]
    pub from: String,

    #[arg(long, help = "Relative path to substitute")]
    pub to: String,

    #[arg(value_name = "FILE", help = "Settings files (defaults to the Claude settings locations)")]
    pub files: Vec<PathBuf>,
}
