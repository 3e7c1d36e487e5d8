// crates/consent-gate-core/tests/policy.rs
// ============================================================================
// Module: Consent Policy Tests
// Description: Validate the has_consent evaluator against the store contract.
// Purpose: Ensure membership, temporal validity, and fail-closed defaults hold.
// Dependencies: consent-gate-core, time
// ============================================================================

//! Consent policy evaluation tests driven by the in-memory store.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::sync::Arc;

use consent_gate_core::AuthorizationContext;
use consent_gate_core::ConsentPeriod;
use consent_gate_core::ConsentPolicyEvaluator;
use consent_gate_core::ConsentRecord;
use consent_gate_core::HAS_CONSENT_POLICY;
use consent_gate_core::InMemoryConsentStore;
use consent_gate_core::ORGANIZATION_ID_KEY;
use consent_gate_core::PATIENT_ID_KEY;
use time::OffsetDateTime;
use time::macros::datetime;

/// Evaluation instant used throughout the suite.
const NOW: OffsetDateTime = datetime!(2024-01-01 00:00:00 UTC);

/// Builds the reference consent record with a configurable end bound.
fn consent_until(end: OffsetDateTime) -> ConsentRecord {
    ConsentRecord::new(
        "52",
        vec!["Organization/53".to_string()],
        ConsentPeriod::new(datetime!(2000-01-01 00:00:00 UTC), end),
    )
}

/// Builds an evaluator over a store seeded with the given records.
fn evaluator_with(records: Vec<ConsentRecord>) -> ConsentPolicyEvaluator {
    let store = InMemoryConsentStore::new();
    for record in records {
        store.insert(record).expect("insert consent");
    }
    ConsentPolicyEvaluator::new(Arc::new(store))
}

/// Builds the standard two-key context.
fn context(patient_id: &str, organization_id: &str) -> AuthorizationContext {
    AuthorizationContext::new()
        .with(PATIENT_ID_KEY, patient_id)
        .with(ORGANIZATION_ID_KEY, organization_id)
}

/// Tests membership plus temporal validity authorizes the organization.
#[test]
fn authorizes_organization_with_valid_consent() {
    let evaluator = evaluator_with(vec![consent_until(datetime!(2050-01-01 00:00:00 UTC))]);

    let authorized = evaluator
        .check_authorized(HAS_CONSENT_POLICY, &context("52", "53"), NOW)
        .expect("evaluation");
    assert!(authorized);
}

/// Tests a non-member organization is rejected despite a valid period.
#[test]
fn rejects_organization_without_membership() {
    let evaluator = evaluator_with(vec![consent_until(datetime!(2050-01-01 00:00:00 UTC))]);

    let authorized = evaluator
        .check_authorized(HAS_CONSENT_POLICY, &context("52", "55"), NOW)
        .expect("evaluation");
    assert!(!authorized);
}

/// Tests an expired period rejects even when membership matches.
#[test]
fn rejects_expired_consent_despite_membership() {
    let evaluator = evaluator_with(vec![consent_until(datetime!(2020-01-01 00:00:00 UTC))]);

    let authorized = evaluator
        .check_authorized(HAS_CONSENT_POLICY, &context("52", "53"), NOW)
        .expect("evaluation");
    assert!(!authorized);
}

/// Tests a missing patient id is a deterministic not-authorized result.
#[test]
fn rejects_missing_patient_id() {
    let evaluator = evaluator_with(vec![consent_until(datetime!(2050-01-01 00:00:00 UTC))]);
    let ctx = AuthorizationContext::new().with(ORGANIZATION_ID_KEY, "53");

    let authorized =
        evaluator.check_authorized(HAS_CONSENT_POLICY, &ctx, NOW).expect("evaluation");
    assert!(!authorized);
}

/// Tests a missing organization id is a deterministic not-authorized result.
#[test]
fn rejects_missing_organization_id() {
    let evaluator = evaluator_with(vec![consent_until(datetime!(2050-01-01 00:00:00 UTC))]);
    let ctx = AuthorizationContext::new().with(PATIENT_ID_KEY, "52");

    let authorized =
        evaluator.check_authorized(HAS_CONSENT_POLICY, &ctx, NOW).expect("evaluation");
    assert!(!authorized);
}

/// Tests a subject without any consent record is rejected.
#[test]
fn rejects_subject_without_consent_record() {
    let evaluator = evaluator_with(Vec::new());

    let authorized = evaluator
        .check_authorized(HAS_CONSENT_POLICY, &context("52", "53"), NOW)
        .expect("evaluation");
    assert!(!authorized);
}

/// Tests the evaluator acts on the most recently stored record.
#[test]
fn latest_consent_record_wins() {
    let revoked = ConsentRecord::new(
        "52",
        vec!["Organization/53".to_string()],
        ConsentPeriod::new(
            datetime!(2000-01-01 00:00:00 UTC),
            datetime!(2050-01-01 00:00:00 UTC),
        ),
    );
    let replacement = ConsentRecord::new(
        "52",
        vec!["Organization/77".to_string()],
        ConsentPeriod::new(
            datetime!(2000-01-01 00:00:00 UTC),
            datetime!(2050-01-01 00:00:00 UTC),
        ),
    );
    let evaluator = evaluator_with(vec![revoked, replacement]);

    let old_grant = evaluator
        .check_authorized(HAS_CONSENT_POLICY, &context("52", "53"), NOW)
        .expect("evaluation");
    assert!(!old_grant);

    let new_grant = evaluator
        .check_authorized(HAS_CONSENT_POLICY, &context("52", "77"), NOW)
        .expect("evaluation");
    assert!(new_grant);
}

/// Tests numeric context values are coerced to their string form.
#[test]
fn numeric_context_values_are_coerced() {
    let evaluator = evaluator_with(vec![consent_until(datetime!(2050-01-01 00:00:00 UTC))]);
    let ctx = AuthorizationContext::new()
        .with(PATIENT_ID_KEY, 52)
        .with(ORGANIZATION_ID_KEY, 53);

    let authorized =
        evaluator.check_authorized(HAS_CONSENT_POLICY, &ctx, NOW).expect("evaluation");
    assert!(authorized);
}

/// Tests policy names other than has_consent default to authorized.
#[test]
fn unknown_internal_policy_defaults_to_authorized() {
    let evaluator = evaluator_with(Vec::new());

    let authorized = evaluator
        .check_authorized("some_other_policy", &AuthorizationContext::new(), NOW)
        .expect("evaluation");
    assert!(authorized);
}

/// Tests period bounds are inclusive under strict before/after comparisons.
#[test]
fn period_bounds_are_inclusive() {
    let start = datetime!(2000-01-01 00:00:00 UTC);
    let end = datetime!(2050-01-01 00:00:00 UTC);
    let evaluator = evaluator_with(vec![consent_until(end)]);

    for instant in [start, end] {
        let authorized = evaluator
            .check_authorized(HAS_CONSENT_POLICY, &context("52", "53"), instant)
            .expect("evaluation");
        assert!(authorized, "boundary instant should be inside the window");
    }

    let before = datetime!(1999-12-31 23:59:59 UTC);
    let authorized = evaluator
        .check_authorized(HAS_CONSENT_POLICY, &context("52", "53"), before)
        .expect("evaluation");
    assert!(!authorized);
}
