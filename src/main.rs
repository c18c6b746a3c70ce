use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = clod_sfx::cli::Cli::parse();
    clod_sfx::run(cli)
}
