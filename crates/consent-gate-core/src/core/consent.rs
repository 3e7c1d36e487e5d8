// crates/consent-gate-core/src/core/consent.rs
// ============================================================================
// Module: Consent Records
// Description: Time-bounded consent grants and change notifications.
// Purpose: Model a subject's grant of data-sharing authority to organizations.
// Dependencies: crate::core::identifiers, serde, time
// ============================================================================

//! ## Overview
//! A consent record represents one subject's grant of data-sharing authority
//! to a set of organizations over a validity period. A subject may accumulate
//! multiple records over time; policy evaluation always acts on the most
//! recently stored one, which the consent store adapter is contracted to
//! return.
//!
//! ## Invariants
//! - Validity is a closed-interval check using strict before/after comparisons
//!   against both bounds; bounds are never silently clamped.
//! - Organization membership is exact reference-string equality, with no
//!   prefix or wildcard matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::identifiers::OrganizationId;
use crate::core::identifiers::SubjectId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Reference prefix for organization references inside consent records.
pub const ORGANIZATION_REFERENCE_PREFIX: &str = "Organization/";

/// Reference prefix for subject references inside consent records.
pub const SUBJECT_REFERENCE_PREFIX: &str = "Patient/";

// ============================================================================
// SECTION: Consent Period
// ============================================================================

/// Validity period of a consent grant.
///
/// # Invariants
/// - `start` and `end` are explicit instants; no ordering is enforced at
///   construction, and an inverted period simply never contains any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPeriod {
    /// Start of the validity window.
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    /// End of the validity window.
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

impl ConsentPeriod {
    /// Creates a validity period from explicit bounds.
    #[must_use]
    pub const fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self {
            start,
            end,
        }
    }

    /// Returns true when `now` falls within the period.
    ///
    /// Uses strict before/after comparisons: an instant strictly before
    /// `start` or strictly after `end` is outside the window.
    #[must_use]
    pub fn contains(&self, now: OffsetDateTime) -> bool {
        !(now < self.start || now > self.end)
    }
}

// ============================================================================
// SECTION: Consent Record
// ============================================================================

/// One subject's time-bounded consent grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Subject the grant belongs to.
    pub subject_id: SubjectId,
    /// Authorized organization references (e.g. `Organization/53`).
    pub organizations: Vec<String>,
    /// Validity period of the grant.
    pub period: ConsentPeriod,
}

impl ConsentRecord {
    /// Creates a consent record.
    #[must_use]
    pub fn new(
        subject_id: impl Into<SubjectId>,
        organizations: Vec<String>,
        period: ConsentPeriod,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            organizations,
            period,
        }
    }

    /// Returns true when the organization appears among the authorized
    /// references, by exact reference-string equality.
    #[must_use]
    pub fn authorizes_organization(&self, organization_id: &OrganizationId) -> bool {
        let reference = format!("{ORGANIZATION_REFERENCE_PREFIX}{organization_id}");
        self.organizations.iter().any(|entry| entry == &reference)
    }

    /// Returns the canonical subject reference (e.g. `Patient/52`).
    #[must_use]
    pub fn subject_reference(&self) -> String {
        format!("{SUBJECT_REFERENCE_PREFIX}{}", self.subject_id)
    }
}

// ============================================================================
// SECTION: Consent Change Notification
// ============================================================================

/// Consent change notification forwarded to the external policy registry.
///
/// # Invariants
/// - `insert` is true for create and update, false for delete.
/// - Built synchronously inside the mutation path so the registry is never
///   out of date relative to committed storage state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentChange {
    /// True when the consent is being inserted or replaced.
    pub insert: bool,
    /// The consent record the change applies to.
    pub consent: ConsentRecord,
}

impl ConsentChange {
    /// Builds an insert/update notification.
    #[must_use]
    pub const fn upsert(consent: ConsentRecord) -> Self {
        Self {
            insert: true,
            consent,
        }
    }

    /// Builds a delete notification.
    #[must_use]
    pub const fn remove(consent: ConsentRecord) -> Self {
        Self {
            insert: false,
            consent,
        }
    }
}
