//! `scholar init` — Write a default configuration file.

use clap::Args;
use scholar_core::{CoreError, ScholarConfig};
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

/// Config to start `init` from. An unreadable or malformed existing file
/// falls back to defaults so `--force` can replace it; the load error is
/// handed back for logging.
pub fn base_config(path: &Path) -> (ScholarConfig, Option<CoreError>) {
    match ScholarConfig::load(path) {
        Ok(config) => (config, None),
        Err(e) => (ScholarConfig::default(), Some(e)),
    }
}

/// Writes `config` (defaults plus any CLI overrides) to `path`.
pub fn run(args: &InitArgs, path: &Path, config: &ScholarConfig) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!(
            "configuration file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    config.save(path)?;
    tracing::info!(path = %path.display(), "wrote config");

    println!("Initialized Scholar configuration at {}", path.display());
    println!("  Network:  {}", config.ledger.network);
    println!("  Package:  {}", config.ledger.package_id);
    println!("  Registry: {}", config.ledger.registry_id);
    println!();
    println!("Set wallet.address to your wallet's address before running read commands.");

    Ok(())
}
