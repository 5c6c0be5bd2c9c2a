//! Integration test: admin → issuer → verifier flow through the adapter.
//!
//! The recording ledger stands in for the deployed module: it records each
//! call and answers from a script, so these tests pin the calls the client
//! makes and how it reports their outcomes.

use scholar_core::{CallArg, EntryPoint};
use scholar_integration_tests::*;
use scholar_ledger::adapters::{CallKind, ScriptedExecution, ScriptedInspection};
use scholar_ledger::InspectionResult;

// =========================================================================
// Full lifecycle
// =========================================================================

#[tokio::test]
async fn test_issue_verify_revoke_lifecycle() {
    let (adapter, ledger) = setup();
    let issuer = address(ISSUER);
    let student = address(STUDENT);
    let verifier = address(VERIFIER);
    let credential = object(CREDENTIAL);

    // Admin authorizes the issuer.
    let added = adapter.add_issuer(ledger.as_ref(), &issuer).await;
    assert!(added.success);

    // Issuer issues a credential to the student.
    let issued = adapter
        .issue_credential(
            ledger.as_ref(),
            &student,
            "Advanced Blockchain Development",
            "ipfs://bafy-metadata",
            Some(1_700_000_000_000),
        )
        .await;
    assert!(issued.success);
    assert_ne!(added.digest, issued.digest);

    // Verifier checks it while the module reports it as valid.
    ledger.set_inspection(
        EntryPoint::VerifyCredential,
        ScriptedInspection::Return(InspectionResult::single(vec![1], "bool")),
    );
    assert!(adapter.verify_credential(&credential, &verifier).await);

    // Issuer revokes; the module now reports it as invalid.
    let revoked = adapter.revoke_credential(ledger.as_ref(), &credential).await;
    assert!(revoked.success);
    ledger.set_inspection(
        EntryPoint::VerifyCredential,
        ScriptedInspection::Return(InspectionResult::single(vec![0], "bool")),
    );
    assert!(!adapter.verify_credential(&credential, &verifier).await);

    let calls = ledger.calls();
    let sequence: Vec<(CallKind, EntryPoint)> = calls
        .iter()
        .map(|c| (c.kind, c.call.entry_point()))
        .collect();
    assert_eq!(
        sequence,
        vec![
            (CallKind::Signed, EntryPoint::AddIssuer),
            (CallKind::Signed, EntryPoint::IssueCredential),
            (CallKind::Inspected, EntryPoint::VerifyCredential),
            (CallKind::Signed, EntryPoint::RevokeCredential),
            (CallKind::Inspected, EntryPoint::VerifyCredential),
        ]
    );
    assert_eq!(calls[2].sender, Some(verifier));
}

#[tokio::test]
async fn test_remove_issuer_after_add() {
    let (adapter, ledger) = setup();
    let issuer = address(ISSUER);

    assert!(adapter.add_issuer(ledger.as_ref(), &issuer).await.success);
    assert!(adapter.remove_issuer(ledger.as_ref(), &issuer).await.success);

    let calls = ledger.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].call.target().function, "remove_issuer");
    assert_eq!(
        calls[1].call.arguments(),
        &[
            CallArg::Object(deployment().registry_id),
            CallArg::Address(issuer)
        ]
    );
}

// =========================================================================
// Failure reporting
// =========================================================================

#[tokio::test]
async fn test_unauthorized_issuer_abort_is_reported() {
    let (adapter, ledger) = setup();
    ledger.push_execution(ScriptedExecution::Abort(
        "MoveAbort(MoveLocation { module: academic_credentials, function: 2 }, 0)".into(),
    ));

    let result = adapter
        .issue_credential(ledger.as_ref(), &address(STUDENT), "Course", "", None)
        .await;
    assert!(!result.success);
    assert!(result.digest.is_none());
    assert!(result.error.unwrap().contains("MoveAbort"));

    // A later call is independent of the earlier failure.
    let retry = adapter
        .issue_credential(ledger.as_ref(), &address(STUDENT), "Course", "", None)
        .await;
    assert!(retry.success);
    assert_eq!(ledger.call_count(), 2);
}

#[tokio::test]
async fn test_wallet_rejection_is_reported() {
    let (adapter, ledger) = setup();
    ledger.push_execution(ScriptedExecution::Reject("User rejected the request.".into()));

    let result = adapter.add_issuer(ledger.as_ref(), &address(ISSUER)).await;
    assert!(!result.success);
    assert!(result.digest.is_none());
    assert!(result.error.unwrap().contains("User rejected the request."));
}

#[tokio::test]
async fn test_verify_failure_modes_are_false() {
    let (adapter, ledger) = setup();
    let credential = object(CREDENTIAL);
    let verifier = address(VERIFIER);

    // Nothing scripted: no return value.
    assert!(!adapter.verify_credential(&credential, &verifier).await);

    // Module aborted (e.g. object does not exist).
    ledger.set_inspection(
        EntryPoint::VerifyCredential,
        ScriptedInspection::Return(InspectionResult {
            results: Vec::new(),
            error: Some("MoveAbort in command 0".into()),
        }),
    );
    assert!(!adapter.verify_credential(&credential, &verifier).await);

    // Transport failure.
    ledger.set_inspection(
        EntryPoint::VerifyCredential,
        ScriptedInspection::Fail("connection reset".into()),
    );
    assert!(!adapter.verify_credential(&credential, &verifier).await);
}

#[tokio::test]
async fn test_authorized_issuers_stays_empty_after_adds() {
    let (adapter, ledger) = setup();
    adapter.add_issuer(ledger.as_ref(), &address(ISSUER)).await;
    adapter.add_issuer(ledger.as_ref(), &address(VERIFIER)).await;

    let issuers = adapter.get_authorized_issuers(&address(ADMIN)).await;
    assert!(issuers.is_empty());

    let last = ledger.last_call().unwrap();
    assert_eq!(last.kind, CallKind::Inspected);
    assert_eq!(last.sender, Some(address(ADMIN)));
    assert_eq!(last.call.entry_point(), EntryPoint::GetAuthorizedIssuers);
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test]
async fn test_concurrent_identical_calls_are_independent() {
    let (adapter, ledger) = setup();
    let issuer = address(ISSUER);

    let (a, b) = tokio::join!(
        adapter.add_issuer(ledger.as_ref(), &issuer),
        adapter.add_issuer(ledger.as_ref(), &issuer),
    );

    assert!(a.success && b.success);
    assert_ne!(a.digest, b.digest);
    assert_eq!(ledger.call_count(), 2);
}
