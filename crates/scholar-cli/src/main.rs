//! Scholar CLI — command-line client for the academic credential registry.
//!
//! Subcommands: init, admin, issuer, student, verify.

mod commands;
mod context;

use clap::{Parser, Subcommand};
use scholar_core::{Network, ScholarConfig};
use std::path::PathBuf;

use context::Context;

/// Scholar — issue, revoke, and verify academic credentials on-chain.
#[derive(Parser, Debug)]
#[command(name = "scholar", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "scholar.toml", global = true)]
    config: PathBuf,

    /// Override the ledger network (mainnet, testnet, devnet, localnet).
    #[arg(long, global = true)]
    network: Option<Network>,

    /// Override the fullnode JSON-RPC endpoint.
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Override the wallet bridge URL.
    #[arg(long, global = true)]
    wallet_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Record mutating calls locally instead of sending them to the wallet.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Manage authorized issuers.
    Admin(commands::admin::AdminArgs),
    /// Issue and revoke credentials.
    Issuer(commands::issuer::IssuerArgs),
    /// Inspect and share credentials you hold.
    Student(commands::student::StudentArgs),
    /// Verify a credential by its object id.
    Verify(commands::verify::VerifyArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, init_load_error) = match &cli.command {
        Commands::Init(_) => commands::init::base_config(&cli.config),
        _ => (ScholarConfig::load(&cli.config)?, None),
    };

    // Apply CLI overrides
    if let Some(network) = cli.network {
        config.ledger.network = network;
    }
    if let Some(ref rpc_url) = cli.rpc_url {
        config.ledger.rpc_url = Some(rpc_url.clone());
    }
    if let Some(ref wallet_url) = cli.wallet_url {
        config.wallet.url = wallet_url.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    context::init_tracing(&config.logging);

    if let Some(ref e) = init_load_error {
        tracing::warn!(path = %cli.config.display(), error = %e, "existing config unreadable, starting from defaults");
    }

    if let Commands::Init(args) = &cli.command {
        return commands::init::run(args, &cli.config, &config);
    }

    tracing::debug!(
        network = %config.ledger.network,
        rpc_url = %config.ledger.rpc_url(),
        dry_run = cli.dry_run,
        "scholar v{}",
        env!("CARGO_PKG_VERSION")
    );

    let ctx = Context::new(config, cli.dry_run, cli.json)?;

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Issuer(args) => commands::issuer::run(args, &ctx).await,
        Commands::Student(args) => commands::student::run(args, &ctx).await,
        Commands::Verify(args) => commands::verify::run(args, &ctx).await,
    }
}
