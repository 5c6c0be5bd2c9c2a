use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniform outcome of a mutating ledger operation.
///
/// A successful result always carries a non-empty digest and no error; a
/// failed one always carries a non-empty error and no digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransactionResult {
    pub fn succeeded(digest: impl Into<String>) -> Self {
        Self {
            success: true,
            digest: Some(digest.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            success: false,
            digest: None,
            error: Some(if error.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                error
            }),
        }
    }
}

/// Execution status reported by the ledger in a transaction's effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    Failure { error: String },
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure { error } => write!(f, "failure: {}", error),
        }
    }
}

/// What a signer hands back after submitting a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    /// Transaction digest assigned by the ledger.
    pub digest: String,
    /// Effects status; `None` when the ledger omitted effects.
    pub status: Option<ExecutionStatus>,
}

impl ExecutionReceipt {
    pub fn success(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            status: Some(ExecutionStatus::Success),
        }
    }

    pub fn failure(digest: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            status: Some(ExecutionStatus::Failure {
                error: error.into(),
            }),
        }
    }
}

/// A single value returned by a Move function: BCS bytes plus its type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnValue {
    pub bytes: Vec<u8>,
    pub type_tag: String,
}

/// Return values of one command of an inspected transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub return_values: Vec<ReturnValue>,
}

/// Output of a non-mutating inspection call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionResult {
    pub results: Vec<CommandResult>,
    /// Abort or execution error reported by the ledger, if any.
    pub error: Option<String>,
}

impl InspectionResult {
    /// Result whose single command returned a single value.
    pub fn single(bytes: Vec<u8>, type_tag: impl Into<String>) -> Self {
        Self {
            results: vec![CommandResult {
                return_values: vec![ReturnValue {
                    bytes,
                    type_tag: type_tag.into(),
                }],
            }],
            error: None,
        }
    }

    /// First return value of the first command.
    pub fn first_return_value(&self) -> Option<&ReturnValue> {
        self.results.first()?.return_values.first()
    }
}
