// crates/consent-gate-core/src/core/claims.rs
// ============================================================================
// Module: Identity Claims
// Description: Verified identity claims extracted from an authenticated credential.
// Purpose: Provide the immutable, request-scoped claim set consumed by the rule engine.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Identity claims are the verified facts about the caller extracted upstream
//! from an already-validated token. The decision layer consumes them by
//! reference and never mutates them; every claim set is scoped to exactly one
//! request. Token parsing and signature verification are out of scope.
//!
//! In the common case exactly zero or one of `subject_id` / `practitioner_id`
//! is present; role-based identities carry neither.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PractitionerId;
use crate::core::identifiers::SubjectId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Role name granting administrative organization management.
pub const ADMIN_ROLE: &str = "admin";

// ============================================================================
// SECTION: Identity Claims
// ============================================================================

/// Verified identity claims for one request.
///
/// # Invariants
/// - Read-only for the duration of one request; the rule engine never mutates them.
/// - Values originate from a verified credential, never from the request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject identifier when the caller acts as a record subject.
    pub subject_id: Option<SubjectId>,
    /// Practitioner identifier when the caller acts as clinical staff.
    pub practitioner_id: Option<PractitionerId>,
    /// Role names carried by the credential.
    pub roles: Vec<String>,
}

impl IdentityClaims {
    /// Creates an empty claim set with no identity signal.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            subject_id: None,
            practitioner_id: None,
            roles: Vec::new(),
        }
    }

    /// Creates a claim set for a caller acting as a record subject.
    #[must_use]
    pub fn for_subject(subject_id: impl Into<SubjectId>) -> Self {
        Self {
            subject_id: Some(subject_id.into()),
            practitioner_id: None,
            roles: Vec::new(),
        }
    }

    /// Creates a claim set for a caller acting as a practitioner.
    #[must_use]
    pub fn for_practitioner(practitioner_id: impl Into<PractitionerId>) -> Self {
        Self {
            subject_id: None,
            practitioner_id: Some(practitioner_id.into()),
            roles: Vec::new(),
        }
    }

    /// Creates a role-only claim set (no subject or practitioner identity).
    #[must_use]
    pub fn for_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_id: None,
            practitioner_id: None,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Replaces the role set on the claim set.
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true when the claim set carries the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|name| name == role)
    }

    /// Returns true when the claim set carries the administrative role.
    #[must_use]
    pub fn has_admin_role(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}
