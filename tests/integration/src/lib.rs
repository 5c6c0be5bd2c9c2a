//! Shared fixtures for the Scholar integration tests.

use std::sync::Arc;

use scholar_core::{Address, LedgerConfig, Network, ObjectId};
use scholar_ledger::{LedgerAdapter, RecordingLedger};

pub const ADMIN: &str = "0xad00000000000000000000000000000000000000000000000000000000000001";
pub const ISSUER: &str = "0x1234567890abcdef1234567890abcdef12345678";
pub const STUDENT: &str = "0x7890abcdef1234567890abcdef1234567890abcd";
pub const VERIFIER: &str = "0xabcdef1234567890abcdef1234567890abcdef12";
pub const CREDENTIAL: &str = "0x9c1d";

pub fn address(hex: &str) -> Address {
    hex.parse().expect("fixture address")
}

pub fn object(hex: &str) -> ObjectId {
    hex.parse().expect("fixture object id")
}

/// Testnet deployment with the default package and registry.
pub fn deployment() -> LedgerConfig {
    LedgerConfig::for_network(Network::Testnet)
}

/// Adapter wired to a fresh recording ledger for both signing and reads.
pub fn setup() -> (LedgerAdapter, Arc<RecordingLedger>) {
    let ledger = Arc::new(RecordingLedger::new());
    let adapter = LedgerAdapter::new(deployment(), ledger.clone());
    (adapter, ledger)
}
