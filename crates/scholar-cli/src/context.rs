//! Shared state for command handlers: the adapter, the signer, and output.

use std::sync::Arc;

use scholar_core::{Address, LoggingConfig, ScholarConfig};
use scholar_ledger::{
    LedgerAdapter, RecordingLedger, Signer, SuiRpcClient, TransactionResult, WalletBridgeSigner,
};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the config.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

pub struct Context {
    pub config: ScholarConfig,
    pub adapter: LedgerAdapter,
    signer: Arc<dyn Signer>,
    recorder: Option<Arc<RecordingLedger>>,
    json: bool,
}

impl Context {
    pub fn new(config: ScholarConfig, dry_run: bool, json: bool) -> anyhow::Result<Self> {
        let inspector = Arc::new(SuiRpcClient::from_config(&config.ledger)?);
        let adapter = LedgerAdapter::new(config.ledger.clone(), inspector);

        let (signer, recorder): (Arc<dyn Signer>, Option<Arc<RecordingLedger>>) = if dry_run {
            let ledger = Arc::new(RecordingLedger::new());
            let signer: Arc<dyn Signer> = ledger.clone();
            (signer, Some(ledger))
        } else {
            let wallet =
                WalletBridgeSigner::new(&config.wallet.url, config.ledger.request_timeout())?;
            tracing::debug!(endpoint = %wallet.endpoint(), "using wallet bridge");
            let signer: Arc<dyn Signer> = Arc::new(wallet);
            (signer, None)
        };

        Ok(Self {
            config,
            adapter,
            signer,
            recorder,
            json,
        })
    }

    pub fn signer(&self) -> &dyn Signer {
        self.signer.as_ref()
    }

    /// Sender for read-only calls: the explicit address, else the
    /// configured wallet address.
    pub fn sender(&self, explicit: Option<Address>) -> anyhow::Result<Address> {
        explicit.or(self.config.wallet.address).ok_or_else(|| {
            anyhow::anyhow!("no sender address: pass --as <ADDRESS> or set wallet.address in the config")
        })
    }

    pub fn json(&self) -> bool {
        self.json
    }

    /// Print the outcome of a mutating call; failures become an error exit.
    pub fn report(&self, result: &TransactionResult, success: &str, action: &str) -> anyhow::Result<()> {
        if let Some(ref recorder) = self.recorder {
            if let Some(recorded) = recorder.last_call() {
                eprintln!("Dry run: call recorded, nothing was sent to the wallet.");
                eprintln!("  {}", recorded.call);
            }
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else if result.success {
            println!("{}", success);
            if let Some(ref digest) = result.digest {
                println!("  Digest:   {}", digest);
            }
        }

        if !result.success {
            let error = result.error.as_deref().unwrap_or("Unknown error");
            anyhow::bail!("{} failed: {}", action, error);
        }
        Ok(())
    }
}
