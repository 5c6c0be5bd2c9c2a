use scholar_core::{CoreError, ObjectId};

/// Ledger-layer errors.
///
/// These never reach callers of the adapter's operations; the adapter
/// flattens them into a failed `TransactionResult` or a negative read.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("signer rejected the transaction: {0}")]
    SignerRejected(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("could not resolve object {id}: {reason}")]
    ObjectResolution { id: ObjectId, reason: String },

    #[error("encoding error: {0}")]
    Encoding(#[from] bcs::Error),

    #[error("core error: {0}")]
    Core(#[from] CoreError),
}
