// crates/consent-gate-core/tests/guard.rs
// ============================================================================
// Module: Mutation Guard Tests
// Description: Validate consent ownership checks and registry notification.
// Purpose: Ensure cross-compartment access is forbidden and changes propagate.
// Dependencies: consent-gate-core, time
// ============================================================================

//! Consent mutation guard tests covering ownership and notification receipts.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;

use consent_gate_core::AccessError;
use consent_gate_core::ConsentChange;
use consent_gate_core::ConsentMutationGuard;
use consent_gate_core::ConsentPeriod;
use consent_gate_core::ConsentRecord;
use consent_gate_core::ConsentRegistry;
use consent_gate_core::IdentityClaims;
use consent_gate_core::RegistryError;
use time::macros::datetime;

/// Registry stub recording every notification.
#[derive(Default)]
struct RecordingRegistry {
    /// Notifications in arrival order.
    changes: Mutex<Vec<ConsentChange>>,
}

impl ConsentRegistry for RecordingRegistry {
    fn notify(&self, change: &ConsentChange) -> Result<(), RegistryError> {
        self.changes
            .lock()
            .map_err(|_| RegistryError::NotifyFailed("mutex poisoned".to_string()))?
            .push(change.clone());
        Ok(())
    }
}

/// Registry stub that always fails delivery.
struct FailingRegistry;

impl ConsentRegistry for FailingRegistry {
    fn notify(&self, _change: &ConsentChange) -> Result<(), RegistryError> {
        Err(RegistryError::NotifyFailed("registry unreachable".to_string()))
    }
}

/// Builds a consent record owned by the given subject.
fn consent_for(subject_id: &str) -> ConsentRecord {
    ConsentRecord::new(
        subject_id,
        vec!["Organization/53".to_string()],
        ConsentPeriod::new(
            datetime!(2000-01-01 00:00:00 UTC),
            datetime!(2050-01-01 00:00:00 UTC),
        ),
    )
}

/// Tests the owning subject may create and the registry sees an insert.
#[test]
fn owner_create_notifies_registry_with_insert() {
    let registry = Arc::new(RecordingRegistry::default());
    let guard = ConsentMutationGuard::new(registry.clone());
    let claims = IdentityClaims::for_subject("52");

    let receipt = guard.on_created(&claims, &consent_for("52")).expect("create allowed");
    assert!(receipt.delivered);
    assert_eq!(receipt.error, None);

    let changes = registry.changes.lock().expect("changes");
    assert_eq!(changes.len(), 1);
    assert!(changes[0].insert);
}

/// Tests delete notifications carry insert = false.
#[test]
fn owner_delete_notifies_registry_with_remove() {
    let registry = Arc::new(RecordingRegistry::default());
    let guard = ConsentMutationGuard::new(registry.clone());
    let claims = IdentityClaims::for_subject("52");

    let receipt = guard.on_deleted(&claims, &consent_for("52")).expect("delete allowed");
    assert!(receipt.delivered);

    let changes = registry.changes.lock().expect("changes");
    assert_eq!(changes.len(), 1);
    assert!(!changes[0].insert);
}

/// Tests updates notify the registry as an insert (replacement).
#[test]
fn owner_update_notifies_registry_with_insert() {
    let registry = Arc::new(RecordingRegistry::default());
    let guard = ConsentMutationGuard::new(registry.clone());
    let claims = IdentityClaims::for_subject("52");

    let receipt = guard.on_updated(&claims, &consent_for("52")).expect("update allowed");
    assert!(receipt.delivered);

    let changes = registry.changes.lock().expect("changes");
    assert!(changes[0].insert);
}

/// Tests a cross-subject write is forbidden and nothing is notified.
#[test]
fn cross_subject_write_is_forbidden() {
    let registry = Arc::new(RecordingRegistry::default());
    let guard = ConsentMutationGuard::new(registry.clone());
    let claims = IdentityClaims::for_subject("52");

    let result = guard.on_updated(&claims, &consent_for("99"));
    assert!(matches!(result, Err(AccessError::Forbidden(_))));
    assert!(registry.changes.lock().expect("changes").is_empty());
}

/// Tests a caller without a subject identity may not touch consents.
#[test]
fn caller_without_subject_identity_is_forbidden() {
    let registry = Arc::new(RecordingRegistry::default());
    let guard = ConsentMutationGuard::new(registry);
    let claims = IdentityClaims::for_roles(["admin"]);

    let result = guard.on_shown(&claims, &consent_for("52"));
    assert!(matches!(result, Err(AccessError::Forbidden(_))));
}

/// Tests the owning subject may read their own consent.
#[test]
fn owner_read_is_allowed() {
    let registry = Arc::new(RecordingRegistry::default());
    let guard = ConsentMutationGuard::new(registry);
    let claims = IdentityClaims::for_subject("52");

    guard.on_shown(&claims, &consent_for("52")).expect("read allowed");
}

/// Tests a lost registry delivery surfaces in the receipt, not as an error.
#[test]
fn lost_registry_delivery_is_reported_in_receipt() {
    let guard = ConsentMutationGuard::new(Arc::new(FailingRegistry));
    let claims = IdentityClaims::for_subject("52");

    let receipt = guard.on_created(&claims, &consent_for("52")).expect("mutation proceeds");
    assert!(!receipt.delivered);
    assert!(receipt.error.unwrap_or_default().contains("registry unreachable"));
}
