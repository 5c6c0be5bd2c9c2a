use async_trait::async_trait;
use scholar_core::{Address, CallDescriptor};

use crate::error::LedgerError;
use crate::types::{ExecutionReceipt, InspectionResult};

/// Capability to authorize and execute a call on the ledger.
///
/// Implementations wrap a wallet session (a browser wallet bridge, a
/// hardware signer, a test double). The adapter borrows one per call and
/// never manages its lifecycle.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign the call, submit it, and wait for the ledger's receipt.
    async fn sign_and_execute(&self, call: &CallDescriptor)
        -> Result<ExecutionReceipt, LedgerError>;
}

/// Read-only access to the ledger: runs a call without a signature and
/// without committing any state change.
#[async_trait]
pub trait Inspector: Send + Sync {
    /// Execute `call` as if sent by `sender` and return its results.
    async fn inspect(
        &self,
        call: &CallDescriptor,
        sender: &Address,
    ) -> Result<InspectionResult, LedgerError>;
}
