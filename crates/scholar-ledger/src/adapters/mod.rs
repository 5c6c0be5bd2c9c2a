//! Concrete `Signer` / `Inspector` implementations.

pub mod recording;
pub mod wallet_bridge;

pub use recording::{CallKind, RecordedCall, RecordingLedger, ScriptedExecution, ScriptedInspection};
pub use wallet_bridge::WalletBridgeSigner;
