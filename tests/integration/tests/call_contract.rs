//! Integration test: call descriptors and the result envelope.

use scholar_core::{CallArg, EntryPoint, LedgerConfig, Network};
use scholar_integration_tests::*;
use scholar_ledger::adapters::ScriptedExecution;
use scholar_ledger::{LedgerAdapter, RecordingLedger, TransactionResult};
use std::sync::Arc;

#[tokio::test]
async fn test_issue_credential_scenario() {
    let (adapter, ledger) = setup();
    let recipient = address(STUDENT);

    let result = adapter
        .issue_credential(
            ledger.as_ref(),
            &recipient,
            "Algorithms 101",
            "ipfs://abc",
            Some(1_700_000_000_000),
        )
        .await;

    assert!(result.success);
    assert!(result.digest.as_deref().is_some_and(|d| !d.is_empty()));

    let call = ledger.last_call().unwrap().call;
    assert_eq!(
        call.target().to_string(),
        format!(
            "{}::academic_credentials::issue_credential",
            deployment().package_id
        )
    );
    let args = call.arguments();
    assert_eq!(args[0], CallArg::Object(deployment().registry_id));
    assert_eq!(args[1], CallArg::Address(recipient));
    assert_eq!(args[2].as_utf8(), Some("Algorithms 101"));
    assert_eq!(args[3].as_utf8(), Some("ipfs://abc"));
    assert_eq!(args[4], CallArg::U64(1_700_000_000_000));
}

#[tokio::test]
async fn test_omitted_timestamp_is_close_to_now() {
    let (adapter, ledger) = setup();
    let before = chrono::Utc::now().timestamp_millis() as u64;
    adapter
        .issue_credential(ledger.as_ref(), &address(STUDENT), "Course", "ipfs://x", None)
        .await;
    let after = chrono::Utc::now().timestamp_millis() as u64;

    match ledger.last_call().unwrap().call.arguments()[4] {
        CallArg::U64(ts) => assert!(ts >= before && ts <= after + 1_000),
        ref other => panic!("expected u64 timestamp, got {:?}", other),
    }
}

/// Every mutation × every ledger outcome honours the envelope invariant.
#[tokio::test]
async fn test_envelope_invariant_across_operations() {
    let outcomes = [
        ScriptedExecution::Success,
        ScriptedExecution::Abort("abort".into()),
        ScriptedExecution::Abort(String::new()),
        ScriptedExecution::NoStatus,
        ScriptedExecution::Reject("rejected".into()),
    ];

    for outcome in outcomes {
        let (adapter, ledger) = setup();
        let mut results: Vec<TransactionResult> = Vec::new();
        for _ in 0..4 {
            ledger.push_execution(outcome.clone());
        }
        results.push(adapter.add_issuer(ledger.as_ref(), &address(ISSUER)).await);
        results.push(adapter.remove_issuer(ledger.as_ref(), &address(ISSUER)).await);
        results.push(
            adapter
                .issue_credential(ledger.as_ref(), &address(STUDENT), "C", "U", Some(1))
                .await,
        );
        results.push(
            adapter
                .revoke_credential(ledger.as_ref(), &object(CREDENTIAL))
                .await,
        );

        let expect_success = outcome == ScriptedExecution::Success;
        for result in results {
            assert_eq!(result.success, expect_success, "outcome {:?}", outcome);
            if result.success {
                assert!(result.digest.as_deref().is_some_and(|d| !d.is_empty()));
                assert!(result.error.is_none());
            } else {
                assert!(result.digest.is_none());
                assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
            }
        }
        assert_eq!(ledger.call_count(), 4);
    }
}

#[tokio::test]
async fn test_each_operation_makes_exactly_one_call() {
    let (adapter, ledger) = setup();
    let expected = [
        EntryPoint::AddIssuer,
        EntryPoint::RemoveIssuer,
        EntryPoint::IssueCredential,
        EntryPoint::RevokeCredential,
        EntryPoint::VerifyCredential,
        EntryPoint::GetAuthorizedIssuers,
    ];

    adapter.add_issuer(ledger.as_ref(), &address(ISSUER)).await;
    adapter.remove_issuer(ledger.as_ref(), &address(ISSUER)).await;
    adapter
        .issue_credential(ledger.as_ref(), &address(STUDENT), "C", "U", None)
        .await;
    adapter
        .revoke_credential(ledger.as_ref(), &object(CREDENTIAL))
        .await;
    adapter
        .verify_credential(&object(CREDENTIAL), &address(VERIFIER))
        .await;
    adapter.get_authorized_issuers(&address(ADMIN)).await;

    let seen: Vec<EntryPoint> = ledger
        .calls()
        .iter()
        .map(|c| c.call.entry_point())
        .collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_separate_deployments_do_not_share_state() {
    let ledger = Arc::new(RecordingLedger::new());
    let staging = LedgerAdapter::new(
        LedgerConfig {
            package_id: object("0x5a"),
            registry_id: object("0x5b"),
            ..LedgerConfig::for_network(Network::Devnet)
        },
        ledger.clone(),
    );
    let (production, _) = setup();

    staging.add_issuer(ledger.as_ref(), &address(ISSUER)).await;
    production.add_issuer(ledger.as_ref(), &address(ISSUER)).await;

    let calls = ledger.calls();
    assert_eq!(calls[0].call.target().package, object("0x5a"));
    assert_eq!(calls[0].call.arguments()[0], CallArg::Object(object("0x5b")));
    assert_eq!(calls[1].call.target().package, deployment().package_id);
}
