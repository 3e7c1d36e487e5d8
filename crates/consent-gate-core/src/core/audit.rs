// crates/consent-gate-core/src/core/audit.rs
// ============================================================================
// Module: Audit Events
// Description: Immutable structured audit records for operation outcomes.
// Purpose: Provide validated, externally-verifiable audit event payloads.
// Dependencies: crate::core::identifiers, serde, thiserror
// ============================================================================

//! ## Overview
//! An audit event is the immutable structured record of one operation outcome
//! on a sensitive resource. Events are created once, validated for structural
//! completeness, and forwarded to an audit sink; they are never mutated or
//! retried by this core. A validation failure is a defect in event
//! construction and must surface as a hard error, never be swallowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::ResourceType;

// ============================================================================
// SECTION: Event Codes
// ============================================================================

/// Operation outcome indicator.
///
/// # Invariants
/// - Variants are stable for sink-side programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed.
    MajorFailure,
}

impl AuditOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::MajorFailure => "major_failure",
        }
    }
}

/// Standardized event-type code for the audited action.
///
/// # Invariants
/// - Labels are the stable wire codes `create`/`read`/`update`/`delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditActionCode {
    /// Instance creation.
    Create,
    /// Instance read.
    Read,
    /// Instance update.
    Update,
    /// Instance deletion.
    Delete,
}

impl AuditActionCode {
    /// Returns the stable event-type code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural validation errors for audit events.
///
/// # Invariants
/// - Raised only for construction defects; treated as fatal by callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditEventError {
    /// A mandatory field is empty.
    #[error("audit event field must not be empty: {0}")]
    MissingField(&'static str),
}

// ============================================================================
// SECTION: Audit Event
// ============================================================================

/// Inputs required to construct an audit event.
pub struct AuditEventParams {
    /// Operation outcome.
    pub outcome: AuditOutcome,
    /// Standardized event-type code.
    pub action: AuditActionCode,
    /// Verified actor identifier (never taken from the request payload).
    pub actor_id: String,
    /// Resource type of the target instance.
    pub resource_type: ResourceType,
    /// Target instance identifier.
    pub resource_id: String,
    /// Optional human-readable resource label.
    pub resource_label: Option<String>,
    /// Human-readable outcome description.
    pub description: String,
}

/// Immutable structured audit record for one operation outcome.
///
/// # Invariants
/// - Created once and never mutated; lifecycle is create-then-forward.
/// - `actor_id` originates from the verified identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Operation outcome.
    pub outcome: AuditOutcome,
    /// Standardized event-type code.
    pub action: AuditActionCode,
    /// Verified actor identifier.
    pub actor_id: String,
    /// Resource type of the target instance.
    pub resource_type: ResourceType,
    /// Target instance identifier.
    pub resource_id: String,
    /// Optional human-readable resource label.
    pub resource_label: Option<String>,
    /// Human-readable outcome description.
    pub description: String,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
}

impl AuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: AuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            outcome: params.outcome,
            action: params.action,
            actor_id: params.actor_id,
            resource_type: params.resource_type,
            resource_id: params.resource_id,
            resource_label: params.resource_label,
            description: params.description,
            timestamp_ms,
        }
    }

    /// Validates structural completeness before forwarding.
    ///
    /// # Errors
    ///
    /// Returns [`AuditEventError::MissingField`] when a mandatory field is
    /// empty. This indicates a construction defect, not a recoverable
    /// runtime condition.
    pub fn validate(&self) -> Result<(), AuditEventError> {
        if self.actor_id.is_empty() {
            return Err(AuditEventError::MissingField("actor_id"));
        }
        if self.resource_type.as_str().is_empty() {
            return Err(AuditEventError::MissingField("resource_type"));
        }
        if self.resource_id.is_empty() {
            return Err(AuditEventError::MissingField("resource_id"));
        }
        if self.description.is_empty() {
            return Err(AuditEventError::MissingField("description"));
        }
        Ok(())
    }
}
