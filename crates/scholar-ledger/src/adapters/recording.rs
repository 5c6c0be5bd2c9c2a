use async_trait::async_trait;
use dashmap::DashMap;
use scholar_core::{Address, CallDescriptor, EntryPoint};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::error::LedgerError;
use crate::traits::{Inspector, Signer};
use crate::types::{ExecutionReceipt, InspectionResult};

/// Outcome the recording ledger produces for the next signed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedExecution {
    /// Executes with status "success".
    Success,
    /// Executes, but the ledger reports a failure status with this message.
    Abort(String),
    /// Executes, but the receipt carries no effects status.
    NoStatus,
    /// The signer refuses or the transport fails before execution.
    Reject(String),
}

/// Response the recording ledger gives to inspection calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInspection {
    Return(InspectionResult),
    Fail(String),
}

/// How a recorded call reached the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Signed,
    Inspected,
}

/// A call observed by the recording ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub call: CallDescriptor,
    /// Sender of an inspection call; `None` for signed calls.
    pub sender: Option<Address>,
}

/// In-memory stand-in for the ledger, acting as both signer and inspector.
///
/// Records every descriptor it receives and answers from a script instead
/// of running any contract logic. Signed calls succeed unless an outcome
/// was queued with [`push_execution`](Self::push_execution); inspections
/// return an empty result unless one was set for the entry point. Used by
/// tests and by the CLI's dry-run mode.
pub struct RecordingLedger {
    calls: Mutex<Vec<RecordedCall>>,
    executions: Mutex<VecDeque<ScriptedExecution>>,
    inspections: DashMap<EntryPoint, ScriptedInspection>,
    sequence: AtomicU64,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            executions: Mutex::new(VecDeque::new()),
            inspections: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Queue the outcome of the next signed call.
    pub fn push_execution(&self, outcome: ScriptedExecution) {
        self.executions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
    }

    /// Answer every later inspection of `entry_point` with `response`.
    pub fn set_inspection(&self, entry_point: EntryPoint, response: ScriptedInspection) {
        self.inspections.insert(entry_point, response);
    }

    /// All calls seen so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn record(&self, kind: CallKind, call: &CallDescriptor, sender: Option<Address>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                kind,
                call: call.clone(),
                sender,
            });
    }

    /// Base58 digest over the descriptor and a per-ledger sequence number,
    /// so identical calls still get distinct digests.
    fn next_digest(&self, call: &CallDescriptor) -> Result<String, LedgerError> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let encoded = serde_json::to_vec(call)
            .map_err(|e| LedgerError::UnexpectedResponse(e.to_string()))?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&encoded);
        hasher.update(&seq.to_le_bytes());
        Ok(bs58::encode(hasher.finalize().as_bytes()).into_string())
    }
}

impl Default for RecordingLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Signer for RecordingLedger {
    async fn sign_and_execute(
        &self,
        call: &CallDescriptor,
    ) -> Result<ExecutionReceipt, LedgerError> {
        self.record(CallKind::Signed, call, None);
        let outcome = self
            .executions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(ScriptedExecution::Success);

        tracing::debug!(entry_point = %call.entry_point(), outcome = ?outcome, "recording ledger executed call");

        match outcome {
            ScriptedExecution::Success => Ok(ExecutionReceipt::success(self.next_digest(call)?)),
            ScriptedExecution::Abort(error) => {
                Ok(ExecutionReceipt::failure(self.next_digest(call)?, error))
            }
            ScriptedExecution::NoStatus => Ok(ExecutionReceipt {
                digest: self.next_digest(call)?,
                status: None,
            }),
            ScriptedExecution::Reject(reason) => Err(LedgerError::SignerRejected(reason)),
        }
    }
}

#[async_trait]
impl Inspector for RecordingLedger {
    async fn inspect(
        &self,
        call: &CallDescriptor,
        sender: &Address,
    ) -> Result<InspectionResult, LedgerError> {
        self.record(CallKind::Inspected, call, Some(*sender));
        let scripted = self
            .inspections
            .get(&call.entry_point())
            .map(|entry| entry.value().clone());
        match scripted {
            Some(ScriptedInspection::Return(result)) => Ok(result),
            Some(ScriptedInspection::Fail(message)) => Err(LedgerError::Rpc {
                code: -32000,
                message,
            }),
            None => Ok(InspectionResult::default()),
        }
    }
}
