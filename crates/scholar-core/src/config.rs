//! Client configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::CoreError;
use crate::types::{Address, Network, ObjectId};

/// Package id of the deployed `academic_credentials` module (testnet).
pub const DEFAULT_PACKAGE_ID: &str =
    "0xc3beb6314754aa1a4bb148d70f5d613d7ab451e71d4baec7fe6914ff237fad73";

/// Shared issuer registry object created at package publication (testnet).
pub const DEFAULT_REGISTRY_ID: &str =
    "0xe9b5c276640619352b31b5c2bb13973c37e3751d9c7c0d47207d1cd058e7facf";

/// Full configuration for the Scholar client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScholarConfig {
    /// Ledger and deployment settings.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Wallet bridge settings.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the credential module lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Named network; selects the default fullnode endpoint.
    #[serde(default)]
    pub network: Network,
    /// Package id of the deployed module.
    #[serde(default = "default_package_id")]
    pub package_id: ObjectId,
    /// Issuer registry object id.
    #[serde(default = "default_registry_id")]
    pub registry_id: ObjectId,
    /// Explicit JSON-RPC endpoint, overriding the network default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// Per-request timeout for ledger RPC calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Base URL of the wallet bridge that signs and executes calls.
    #[serde(default = "default_wallet_url")]
    pub url: String,
    /// Address of the connected wallet, used as sender for reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_package_id() -> ObjectId {
    DEFAULT_PACKAGE_ID
        .parse()
        .expect("DEFAULT_PACKAGE_ID is valid hex")
}
fn default_registry_id() -> ObjectId {
    DEFAULT_REGISTRY_ID
        .parse()
        .expect("DEFAULT_REGISTRY_ID is valid hex")
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_wallet_url() -> String {
    "http://127.0.0.1:9100".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            package_id: default_package_id(),
            registry_id: default_registry_id(),
            rpc_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            url: default_wallet_url(),
            address: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LedgerConfig {
    /// Config for `network` with the default deployment ids.
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    /// Effective JSON-RPC endpoint.
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.fullnode_url())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ScholarConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: ScholarConfig = toml::from_str(&contents)?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}
