//! Scholar Core — identifiers, network selection, call descriptors, and
//! configuration shared by the Scholar credential client.

pub mod call;
pub mod config;
pub mod error;
pub mod types;

pub use call::{CallArg, CallDescriptor, EntryPoint, MoveTarget, MODULE_NAME};
pub use config::{LedgerConfig, LoggingConfig, ScholarConfig, WalletConfig};
pub use error::CoreError;
pub use types::{Address, Network, ObjectId};
