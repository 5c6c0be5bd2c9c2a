use async_trait::async_trait;
use scholar_core::{CallDescriptor, EntryPoint};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::LedgerError;
use crate::traits::Signer;
use crate::types::{ExecutionReceipt, ExecutionStatus};

/// Signer that forwards calls to an external wallet process over HTTP.
///
/// The wallet owns the keys and the session; this side only posts the
/// call descriptor and reads back the executed transaction's digest and
/// effects status.
pub struct WalletBridgeSigner {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SignAndExecuteRequest<'a> {
    transaction: &'a CallDescriptor,
    options: ExecuteOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteOptions {
    show_effects: bool,
    show_object_changes: bool,
}

#[derive(Debug, Deserialize)]
struct WalletResponse {
    digest: String,
    #[serde(default)]
    effects: Option<Effects>,
}

#[derive(Debug, Deserialize)]
struct Effects {
    #[serde(default)]
    status: Option<EffectsStatus>,
}

#[derive(Debug, Deserialize)]
struct EffectsStatus {
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl WalletResponse {
    fn into_receipt(self) -> ExecutionReceipt {
        let status = self.effects.and_then(|e| e.status).map(|s| {
            if s.status == "success" {
                ExecutionStatus::Success
            } else {
                ExecutionStatus::Failure {
                    error: s
                        .error
                        .unwrap_or_else(|| format!("execution status: {}", s.status)),
                }
            }
        });
        ExecutionReceipt {
            digest: self.digest,
            status,
        }
    }
}

impl WalletBridgeSigner {
    /// `base_url` is the wallet bridge root, e.g. `http://127.0.0.1:9100`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/sign-and-execute", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Signer for WalletBridgeSigner {
    async fn sign_and_execute(
        &self,
        call: &CallDescriptor,
    ) -> Result<ExecutionReceipt, LedgerError> {
        let body = SignAndExecuteRequest {
            transaction: call,
            options: ExecuteOptions {
                show_effects: true,
                show_object_changes: call.entry_point() == EntryPoint::IssueCredential,
            },
        };

        let resp = self.http.post(&self.endpoint).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let reason = match resp.json::<ErrorResponse>().await {
                Ok(err) => err.error,
                Err(_) => format!("wallet bridge returned HTTP {}", status),
            };
            tracing::warn!(entry_point = %call.entry_point(), %status, reason = %reason, "wallet rejected call");
            return Err(LedgerError::SignerRejected(reason));
        }

        let data: WalletResponse = resp.json().await?;
        Ok(data.into_receipt())
    }
}
