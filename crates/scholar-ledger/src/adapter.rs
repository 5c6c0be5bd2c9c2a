use std::sync::Arc;

use scholar_core::{Address, CallArg, CallDescriptor, EntryPoint, LedgerConfig, ObjectId};

use crate::traits::{Inspector, Signer};
use crate::types::{ExecutionReceipt, ExecutionStatus, InspectionResult, TransactionResult};

/// Ledger adapter for the `academic_credentials` module.
///
/// Every mutating operation builds exactly one `CallDescriptor`, hands it
/// to the caller's signer, and folds whatever comes back (receipt, ledger
/// failure, transport or signing error) into a `TransactionResult`. Reads
/// go through the inspector and degrade to `false` / an empty list. No
/// operation returns an error to its caller.
pub struct LedgerAdapter {
    config: LedgerConfig,
    inspector: Arc<dyn Inspector>,
}

impl LedgerAdapter {
    pub fn new(config: LedgerConfig, inspector: Arc<dyn Inspector>) -> Self {
        Self { config, inspector }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn describe(&self, entry_point: EntryPoint, arguments: Vec<CallArg>) -> CallDescriptor {
        CallDescriptor::new(self.config.package_id, entry_point, arguments)
    }

    fn registry(&self) -> CallArg {
        CallArg::Object(self.config.registry_id)
    }

    // Call builders

    pub fn add_issuer_call(&self, issuer: &Address) -> CallDescriptor {
        self.describe(
            EntryPoint::AddIssuer,
            vec![self.registry(), CallArg::Address(*issuer)],
        )
    }

    pub fn remove_issuer_call(&self, issuer: &Address) -> CallDescriptor {
        self.describe(
            EntryPoint::RemoveIssuer,
            vec![self.registry(), CallArg::Address(*issuer)],
        )
    }

    /// `issued_at_millis` defaults to the current wall-clock time.
    pub fn issue_credential_call(
        &self,
        recipient: &Address,
        course_name: &str,
        metadata_url: &str,
        issued_at_millis: Option<u64>,
    ) -> CallDescriptor {
        let issued_at = issued_at_millis.unwrap_or_else(now_millis);
        self.describe(
            EntryPoint::IssueCredential,
            vec![
                self.registry(),
                CallArg::Address(*recipient),
                CallArg::utf8(course_name),
                CallArg::utf8(metadata_url),
                CallArg::U64(issued_at),
            ],
        )
    }

    pub fn revoke_credential_call(&self, credential_id: &ObjectId) -> CallDescriptor {
        self.describe(
            EntryPoint::RevokeCredential,
            vec![CallArg::Object(*credential_id)],
        )
    }

    pub fn verify_credential_call(&self, credential_id: &ObjectId) -> CallDescriptor {
        self.describe(
            EntryPoint::VerifyCredential,
            vec![CallArg::Object(*credential_id)],
        )
    }

    pub fn get_authorized_issuers_call(&self) -> CallDescriptor {
        self.describe(EntryPoint::GetAuthorizedIssuers, vec![self.registry()])
    }

    // Mutating operations

    pub async fn add_issuer(&self, signer: &dyn Signer, issuer: &Address) -> TransactionResult {
        self.submit(signer, self.add_issuer_call(issuer)).await
    }

    pub async fn remove_issuer(&self, signer: &dyn Signer, issuer: &Address) -> TransactionResult {
        self.submit(signer, self.remove_issuer_call(issuer)).await
    }

    pub async fn issue_credential(
        &self,
        signer: &dyn Signer,
        recipient: &Address,
        course_name: &str,
        metadata_url: &str,
        issued_at_millis: Option<u64>,
    ) -> TransactionResult {
        let call =
            self.issue_credential_call(recipient, course_name, metadata_url, issued_at_millis);
        self.submit(signer, call).await
    }

    pub async fn revoke_credential(
        &self,
        signer: &dyn Signer,
        credential_id: &ObjectId,
    ) -> TransactionResult {
        self.submit(signer, self.revoke_credential_call(credential_id))
            .await
    }

    // Reads

    /// `true` iff the first byte of the first return value is `1`.
    pub async fn verify_credential(&self, credential_id: &ObjectId, verifier: &Address) -> bool {
        let call = self.verify_credential_call(credential_id);
        match self.inspector.inspect(&call, verifier).await {
            Ok(result) => {
                let valid = credential_flag(&result);
                tracing::debug!(credential_id = %credential_id, valid, "credential inspected");
                valid
            }
            Err(e) => {
                tracing::error!(credential_id = %credential_id, error = %e, "error verifying credential");
                false
            }
        }
    }

    /// Always empty: the raw inspection output is logged but the issuer
    /// list is not decoded yet.
    pub async fn get_authorized_issuers(&self, admin: &Address) -> Vec<Address> {
        let call = self.get_authorized_issuers_call();
        match self.inspector.inspect(&call, admin).await {
            Ok(result) => {
                tracing::debug!(sender = %admin, result = ?result, "inspect result");
            }
            Err(e) => {
                tracing::error!(sender = %admin, error = %e, "error fetching issuers");
            }
        }
        Vec::new()
    }

    /// Execute one descriptor through the signer and normalize the outcome.
    async fn submit(&self, signer: &dyn Signer, call: CallDescriptor) -> TransactionResult {
        let entry_point = call.entry_point();
        tracing::debug!(call = %call, "submitting ledger call");
        match signer.sign_and_execute(&call).await {
            Ok(receipt) => receipt_to_result(entry_point, receipt),
            Err(e) => {
                tracing::warn!(entry_point = %entry_point, error = %e, "ledger call failed");
                TransactionResult::failed(e.to_string())
            }
        }
    }
}

fn receipt_to_result(entry_point: EntryPoint, receipt: ExecutionReceipt) -> TransactionResult {
    match receipt.status {
        Some(ExecutionStatus::Success) if !receipt.digest.is_empty() => {
            tracing::info!(entry_point = %entry_point, digest = %receipt.digest, "ledger call succeeded");
            TransactionResult::succeeded(receipt.digest)
        }
        Some(ExecutionStatus::Success) => {
            tracing::warn!(entry_point = %entry_point, "ledger reported success without a digest");
            TransactionResult::failed("ledger reported success without a transaction digest")
        }
        Some(ExecutionStatus::Failure { error }) => {
            tracing::warn!(entry_point = %entry_point, digest = %receipt.digest, error = %error, "ledger execution failed");
            TransactionResult::failed(if error.trim().is_empty() {
                format!("transaction {} failed", receipt.digest)
            } else {
                error
            })
        }
        None => {
            tracing::warn!(entry_point = %entry_point, digest = %receipt.digest, "no execution status in receipt");
            TransactionResult::failed("ledger did not report an execution status")
        }
    }
}

fn credential_flag(result: &InspectionResult) -> bool {
    result
        .first_return_value()
        .and_then(|value| value.bytes.first())
        .is_some_and(|byte| *byte == 1)
}

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
