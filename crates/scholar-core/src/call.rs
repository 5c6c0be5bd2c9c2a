//! Call descriptors for the `academic_credentials` Move module.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Address, ObjectId};

/// Name of the deployed credential module inside the package.
pub const MODULE_NAME: &str = "academic_credentials";

/// Entry points exposed by the credential module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    AddIssuer,
    RemoveIssuer,
    IssueCredential,
    RevokeCredential,
    VerifyCredential,
    GetAuthorizedIssuers,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 6] = [
        Self::AddIssuer,
        Self::RemoveIssuer,
        Self::IssueCredential,
        Self::RevokeCredential,
        Self::VerifyCredential,
        Self::GetAuthorizedIssuers,
    ];

    /// Function name as declared in the Move module.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddIssuer => "add_issuer",
            Self::RemoveIssuer => "remove_issuer",
            Self::IssueCredential => "issue_credential",
            Self::RevokeCredential => "revoke_credential",
            Self::VerifyCredential => "verify_credential",
            Self::GetAuthorizedIssuers => "get_authorized_issuers",
        }
    }

    /// Entry points only ever reached through inspection calls.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::VerifyCredential | Self::GetAuthorizedIssuers)
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fully qualified Move function: `<package>::<module>::<function>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveTarget {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// A positional, typed argument of a Move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    /// Reference to an on-ledger object, resolved by the ledger.
    Object(ObjectId),
    /// Raw 32-byte address.
    Address(Address),
    /// `vector<u8>`.
    Bytes(Vec<u8>),
    U64(u64),
}

impl CallArg {
    /// Encode a string as its UTF-8 bytes.
    pub fn utf8(value: &str) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }

    /// Decode a `Bytes` argument back into a string, if it is valid UTF-8.
    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            Self::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

/// One pending ledger call: a target plus its ordered arguments.
///
/// Built fresh for every operation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallDescriptor {
    entry_point: EntryPoint,
    target: MoveTarget,
    arguments: Vec<CallArg>,
}

impl CallDescriptor {
    pub fn new(package: ObjectId, entry_point: EntryPoint, arguments: Vec<CallArg>) -> Self {
        Self {
            entry_point,
            target: MoveTarget {
                package,
                module: MODULE_NAME.to_string(),
                function: entry_point.name().to_string(),
            },
            arguments,
        }
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.entry_point
    }

    pub fn target(&self) -> &MoveTarget {
        &self.target
    }

    pub fn arguments(&self) -> &[CallArg] {
        &self.arguments
    }

    /// Object ids referenced by the arguments, in argument order.
    pub fn object_inputs(&self) -> impl Iterator<Item = &ObjectId> {
        self.arguments.iter().filter_map(|arg| match arg {
            CallArg::Object(id) => Some(id),
            _ => None,
        })
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.target)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match arg {
                CallArg::Object(id) => write!(f, "object {}", id)?,
                CallArg::Address(addr) => write!(f, "address {}", addr)?,
                CallArg::Bytes(bytes) => match std::str::from_utf8(bytes) {
                    Ok(s) => write!(f, "b\"{}\"", s)?,
                    Err(_) => write!(f, "<{} bytes>", bytes.len())?,
                },
                CallArg::U64(v) => write!(f, "{}u64", v)?,
            }
        }
        write!(f, ")")
    }
}
