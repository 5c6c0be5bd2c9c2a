//! Scholar Ledger Adapter
//!
//! Builds call descriptors for the `academic_credentials` entry points,
//! submits them through a caller-supplied signer, inspects read-only calls
//! through a fullnode, and normalizes every outcome into a uniform result.

pub mod adapter;
pub mod adapters;
pub mod encoding;
pub mod error;
pub mod rpc;
pub mod traits;
pub mod types;

pub use adapter::LedgerAdapter;
pub use adapters::{RecordingLedger, WalletBridgeSigner};
pub use error::LedgerError;
pub use rpc::SuiRpcClient;
pub use traits::{Inspector, Signer};
pub use types::{ExecutionReceipt, ExecutionStatus, InspectionResult, TransactionResult};
