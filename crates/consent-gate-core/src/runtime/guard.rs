// crates/consent-gate-core/src/runtime/guard.rs
// ============================================================================
// Module: Consent Mutation Guard
// Description: Ownership checks and registry notification for consent mutations.
// Purpose: Keep consent access within the owning compartment and the registry current.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The mutation guard sits on the consent resource's read and mutation paths.
//! It rejects any access to a consent record whose subject compartment the
//! caller does not own, and on create/update/delete it notifies the external
//! policy registry synchronously inside the mutation path so the registry is
//! never out of date relative to committed storage state.
//!
//! Registry delivery is fire-and-forget from the operation's perspective: a
//! failed notification never aborts the mutation, but the delivery outcome is
//! returned in a receipt so callers can surface the loss instead of losing
//! it silently.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::ConsentChange;
use crate::core::ConsentRecord;
use crate::core::IdentityClaims;
use crate::interfaces::ConsentRegistry;
use crate::runtime::rules::AccessError;

// ============================================================================
// SECTION: Notify Receipt
// ============================================================================

/// Delivery outcome of one registry notification.
///
/// # Invariants
/// - `error` is `None` exactly when `delivered` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyReceipt {
    /// Whether the registry accepted the notification.
    pub delivered: bool,
    /// Delivery error text when the notification was lost.
    pub error: Option<String>,
}

impl NotifyReceipt {
    /// Builds a successful-delivery receipt.
    #[must_use]
    pub const fn delivered() -> Self {
        Self {
            delivered: true,
            error: None,
        }
    }

    /// Builds a lost-delivery receipt carrying the error text.
    #[must_use]
    pub const fn lost(error: String) -> Self {
        Self {
            delivered: false,
            error: Some(error),
        }
    }
}

// ============================================================================
// SECTION: Mutation Guard
// ============================================================================

/// Guards consent-record access and forwards change notifications.
#[derive(Clone)]
pub struct ConsentMutationGuard {
    /// Registry notified on every committed consent mutation.
    registry: Arc<dyn ConsentRegistry>,
}

impl ConsentMutationGuard {
    /// Creates a guard over the provided registry.
    #[must_use]
    pub fn new(registry: Arc<dyn ConsentRegistry>) -> Self {
        Self {
            registry,
        }
    }

    /// Checks that the caller owns the consent record's subject compartment.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] when the caller carries no subject
    /// identity or the identity does not match the record's subject.
    pub fn check_ownership(
        &self,
        claims: &IdentityClaims,
        consent: &ConsentRecord,
    ) -> Result<(), AccessError> {
        match &claims.subject_id {
            Some(subject_id) if subject_id == &consent.subject_id => Ok(()),
            _ => Err(AccessError::Forbidden(
                "reading or modifying a consent owned by another subject is not allowed"
                    .to_string(),
            )),
        }
    }

    /// Guards a consent read.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] on a cross-compartment read.
    pub fn on_shown(
        &self,
        claims: &IdentityClaims,
        consent: &ConsentRecord,
    ) -> Result<(), AccessError> {
        self.check_ownership(claims, consent)
    }

    /// Guards a consent create and notifies the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] on a cross-compartment write; the
    /// registry outcome is reported in the receipt, never as an error.
    pub fn on_created(
        &self,
        claims: &IdentityClaims,
        consent: &ConsentRecord,
    ) -> Result<NotifyReceipt, AccessError> {
        self.check_ownership(claims, consent)?;
        Ok(self.notify(ConsentChange::upsert(consent.clone())))
    }

    /// Guards a consent update and notifies the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] on a cross-compartment write; the
    /// registry outcome is reported in the receipt, never as an error.
    pub fn on_updated(
        &self,
        claims: &IdentityClaims,
        consent: &ConsentRecord,
    ) -> Result<NotifyReceipt, AccessError> {
        self.check_ownership(claims, consent)?;
        Ok(self.notify(ConsentChange::upsert(consent.clone())))
    }

    /// Guards a consent delete and notifies the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] on a cross-compartment delete; the
    /// registry outcome is reported in the receipt, never as an error.
    pub fn on_deleted(
        &self,
        claims: &IdentityClaims,
        consent: &ConsentRecord,
    ) -> Result<NotifyReceipt, AccessError> {
        self.check_ownership(claims, consent)?;
        Ok(self.notify(ConsentChange::remove(consent.clone())))
    }

    /// Forwards the change synchronously and folds the outcome into a receipt.
    fn notify(&self, change: ConsentChange) -> NotifyReceipt {
        match self.registry.notify(&change) {
            Ok(()) => NotifyReceipt::delivered(),
            Err(err) => NotifyReceipt::lost(err.to_string()),
        }
    }
}
