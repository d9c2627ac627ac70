use anyhow::Result;
use clap::Parser;
use sable_bin::cli::{Cli, Command};
use sable_log::{LogConfig, LogGuard};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard: LogGuard = sable_log::init(LogConfig::default())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    match cli.command {
        Command::Preview(args) => sable_bin::preview::run(&args),
    }
}
