// crates/consent-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Consent Gate Interfaces
// Description: Backend-agnostic interfaces for consent storage, audit, and registry.
// Purpose: Define the contract surfaces used by the decision runtimes.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Consent Gate integrates with external systems without
//! embedding backend-specific details. Implementations perform blocking I/O
//! and are invoked synchronously on the request's own execution context;
//! there is no background queue and no internal retry. Implementations must
//! fail closed on missing or invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::AuditEvent;
use crate::core::ConsentChange;
use crate::core::ConsentRecord;
use crate::core::SubjectId;

// ============================================================================
// SECTION: Consent Store
// ============================================================================

/// Consent store adapter errors.
///
/// # Invariants
/// - Raised only for adapter failures; a missing record is `Ok(None)`.
#[derive(Debug, Error)]
pub enum ConsentStoreError {
    /// The underlying store reported an error.
    #[error("consent store error: {0}")]
    Store(String),
}

/// Backend-agnostic consent store adapter.
///
/// When multiple consent records exist for a subject, implementations must
/// return the most recently stored one, since policy evaluation always acts
/// on the latest grant.
pub trait ConsentStore: Send + Sync {
    /// Retrieves the most relevant consent record for the subject.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentStoreError`] when the lookup itself fails.
    fn retrieve_consent(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<ConsentRecord>, ConsentStoreError>;
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Audit sink delivery errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum AuditSinkError {
    /// The sink failed to accept the event.
    #[error("audit sink delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Transport-agnostic audit sink.
///
/// Delivery is at-most-once: implementations must not retry internally, and
/// loss of the sink is reported to the caller, not hidden.
pub trait AuditSink: Send + Sync {
    /// Forwards one validated audit event.
    ///
    /// # Errors
    ///
    /// Returns [`AuditSinkError`] when delivery fails.
    fn send(&self, event: &AuditEvent) -> Result<(), AuditSinkError>;
}

// ============================================================================
// SECTION: Consent Registry
// ============================================================================

/// Consent registry notification errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry endpoint rejected or never received the notification.
    #[error("consent registry notification failed: {0}")]
    NotifyFailed(String),
}

/// External policy/consent registry notified on consent mutations.
///
/// Notifications happen synchronously inside the mutation path so the
/// registry is never out of date relative to committed storage state.
pub trait ConsentRegistry: Send + Sync {
    /// Forwards one consent change notification.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when delivery fails.
    fn notify(&self, change: &ConsentChange) -> Result<(), RegistryError>;
}
