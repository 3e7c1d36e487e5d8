// crates/consent-gate-core/src/runtime/policy.rs
// ============================================================================
// Module: Consent Policy Evaluator
// Description: Named-policy evaluation over consent records.
// Purpose: Decide whether an organization currently holds valid consent for a subject.
// Dependencies: crate::core, crate::interfaces, time
// ============================================================================

//! ## Overview
//! The consent policy evaluator answers one question: does the named
//! organization currently hold valid consent for the named subject? Every
//! evaluation re-fetches the consent record through the store adapter, since
//! consent can change between calls and staleness is unacceptable for an
//! access decision. The evaluator performs no mutation and no caching.
//!
//! The caller supplies `now` explicitly; the decision layer never reads
//! wall-clock time itself, which keeps evaluations replayable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use time::OffsetDateTime;

use crate::core::AuthorizationContext;
use crate::core::ORGANIZATION_ID_KEY;
use crate::core::OrganizationId;
use crate::core::PATIENT_ID_KEY;
use crate::core::SubjectId;
use crate::interfaces::ConsentStore;
use crate::interfaces::ConsentStoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The only named policy this core defines.
pub const HAS_CONSENT_POLICY: &str = "has_consent";

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Evaluates named policies against the consent store.
#[derive(Clone)]
pub struct ConsentPolicyEvaluator {
    /// Consent store adapter used for every evaluation.
    store: Arc<dyn ConsentStore>,
}

impl ConsentPolicyEvaluator {
    /// Creates an evaluator over the provided consent store.
    #[must_use]
    pub fn new(store: Arc<dyn ConsentStore>) -> Self {
        Self {
            store,
        }
    }

    /// Evaluates the named policy against the context at the given instant.
    ///
    /// Policy names other than [`HAS_CONSENT_POLICY`] are trivially
    /// authorized; callers are expected to validate names against their
    /// allow-list before invoking.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentStoreError`] when the consent lookup itself fails.
    pub fn check_authorized(
        &self,
        policy_name: &str,
        context: &AuthorizationContext,
        now: OffsetDateTime,
    ) -> Result<bool, ConsentStoreError> {
        if policy_name == HAS_CONSENT_POLICY {
            self.check_has_consent(context, now)
        } else {
            Ok(true)
        }
    }

    /// Evaluates `has_consent`: organization membership plus temporal validity.
    ///
    /// Missing context keys and missing consent records are deterministic
    /// not-authorized results, never errors (fail closed, no implicit
    /// wildcard).
    fn check_has_consent(
        &self,
        context: &AuthorizationContext,
        now: OffsetDateTime,
    ) -> Result<bool, ConsentStoreError> {
        let Some(organization_id) = context.get_str(ORGANIZATION_ID_KEY) else {
            return Ok(false);
        };
        let Some(patient_id) = context.get_str(PATIENT_ID_KEY) else {
            return Ok(false);
        };

        let subject_id = SubjectId::new(patient_id);
        let Some(consent) = self.store.retrieve_consent(&subject_id)? else {
            return Ok(false);
        };

        let organization_id = OrganizationId::new(organization_id);
        if !consent.authorizes_organization(&organization_id) {
            return Ok(false);
        }
        Ok(consent.period.contains(now))
    }
}
