pub mod adapters;
pub mod audio;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod plugin;
pub mod settings;
pub mod soundpack;

use anyhow::Context;
use audio::{CommandPlayer, Player, PrintPlayer};
use cli::{Cli, Commands};
use config::{AppContext, ResolvedSoundConfig};
use events::Invocation;
use plugin::Plugin;
use settings::FixOutcome;
use std::io::Read;
use std::sync::Arc;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    let ctx = AppContext::detect(cli.root, cli.config_dir);

    match cli.command {
        Commands::Notify(args) => notify(args, &ctx),
        Commands::Config(args) => config_cmd(args, &ctx),
        Commands::ClaudeHooks => claude_hooks(&ctx),
        Commands::FixPaths(args) => fix_paths(args, &ctx),
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn notify(args: cli::NotifyArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let invocation = match (args.hook, args.event) {
        (Some(hook), _) => Some(Invocation::Hook(hook)),
        (None, Some(event)) => Some(Invocation::Event(event)),
        (None, None) => {
            let payload = args.payload.or_else(read_stdin_json);
            let payload = match payload {
                Some(payload) => payload,
                None => {
                    tracing::warn!("no payload provided; skipping");
                    return Ok(());
                }
            };

            match adapters::parse_invocation(args.source, &payload) {
                Ok(invocation) => invocation,
                Err(err) => {
                    tracing::warn!(error = ?err, "unreadable event payload; skipping");
                    return Ok(());
                }
            }
        }
    };

    let invocation = match invocation {
        Some(invocation) => invocation,
        None => {
            tracing::debug!("event not recognized; skipping");
            return Ok(());
        }
    };

    let player: Arc<dyn Player> = if args.dry_run {
        Arc::new(PrintPlayer)
    } else {
        Arc::new(CommandPlayer::new(args.player))
    };

    let plugin = Plugin::init(ctx, player);
    if !plugin.handle(&invocation) {
        tracing::debug!(%invocation, "no sound configured");
    }

    Ok(())
}

fn config_cmd(args: cli::ConfigArgs, ctx: &AppContext) -> anyhow::Result<()> {
    if args.show {
        let config = ResolvedSoundConfig::load(ctx);
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.paths {
        for path in ctx.candidate_paths() {
            let status = if path.exists() { "found" } else { "missing" };
            println!("{} ({})", path.display(), status);
        }
        return Ok(());
    }

    match soundpack::load_from_paths(&ctx.candidate_paths()) {
        Some(loaded) => println!("{}", loaded.path.display()),
        None => println!("no sound pack found; using defaults"),
    }
    Ok(())
}

fn claude_hooks(ctx: &AppContext) -> anyhow::Result<()> {
    let hooks = match soundpack::load_from_paths(&ctx.candidate_paths()) {
        Some(loaded) => soundpack::generate_claude_hooks(&loaded.pack),
        None => {
            tracing::warn!("no sound pack found");
            Default::default()
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&hooks).context("serialize claude hooks")?
    );
    Ok(())
}

fn fix_paths(args: cli::FixPathsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let files = if args.files.is_empty() {
        settings::default_settings_files(ctx)
    } else {
        args.files
    };

    for file in files {
        match settings::fix_paths(&file, &args.from, &args.to)? {
            FixOutcome::Missing => tracing::debug!(path = %file.display(), "settings file missing"),
            FixOutcome::Unchanged => println!("{}: unchanged", file.display()),
            FixOutcome::Patched {
                replacements,
                backup,
            } => println!(
                "{}: {} replacement(s), backup at {}",
                file.display(),
                replacements,
                backup.display()
            ),
        }
    }

    Ok(())
}

fn read_stdin_json() -> Option<String> {
    let mut input = String::new();
    let mut stdin = std::io::stdin();
    if stdin.read_to_string(&mut input).is_ok() {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    } else {
        None
    }
}
