// crates/consent-gate-relay/src/recorder.rs
// ============================================================================
// Module: Audit Recorder
// Description: Turns operation outcomes into structured audit events or log lines.
// Purpose: Guarantee every sensitive-resource operation leaves a verifiable trail.
// Dependencies: consent-gate-core, thiserror, tracing
// ============================================================================

//! ## Overview
//! The recorder is the single choke point between operation outcomes and the
//! audit trail. Operations on sensitive resource types produce a validated
//! structured [`AuditEvent`] forwarded synchronously to the configured
//! [`AuditSink`]; everything else produces a lightweight `tracing` log line.
//!
//! ## Invariants
//! - Event validation failure is a construction defect and a hard error; it
//!   is never swallowed.
//! - Sink delivery is at-most-once; a delivery failure surfaces as an error
//!   and is never retried here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use consent_gate_core::AuditActionCode;
use consent_gate_core::AuditEvent;
use consent_gate_core::AuditEventError;
use consent_gate_core::AuditEventParams;
use consent_gate_core::AuditOutcome;
use consent_gate_core::AuditSink;
use consent_gate_core::AuditSinkError;
use consent_gate_core::ResourceType;
use consent_gate_core::SENSITIVE_RESOURCE_TYPES;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Hard failures while recording an operation outcome.
///
/// # Invariants
/// - Both variants fail the encompassing operation; audit loss on a
///   sensitive resource is never silent.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The audit event was structurally incomplete.
    #[error("audit event construction failed: {0}")]
    Construction(#[from] AuditEventError),
    /// The audit sink rejected the event.
    #[error("audit sink delivery failed: {0}")]
    Sink(#[from] AuditSinkError),
}

// ============================================================================
// SECTION: Operation Outcome
// ============================================================================

/// Outcome of one resource-layer operation, as seen by the recorder.
///
/// # Invariants
/// - `actor_id` originates from the verified identity, never from the
///   request payload.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    /// Whether the operation completed successfully.
    pub succeeded: bool,
    /// Standardized event-type code for the action.
    pub action: AuditActionCode,
    /// Verified actor identifier.
    pub actor_id: String,
    /// Resource type of the target instance.
    pub resource_type: ResourceType,
    /// Target instance identifier.
    pub resource_id: String,
    /// Optional human-readable resource label.
    pub resource_label: Option<String>,
    /// Request path the operation arrived on, for log-line context.
    pub request_path: String,
}

// ============================================================================
// SECTION: Audit Recorder
// ============================================================================

/// Records operation outcomes to the audit trail.
pub struct AuditRecorder {
    /// Sink receiving structured events for sensitive resource types.
    sink: Arc<dyn AuditSink>,
    /// Resource types that require a full structured audit trail.
    sensitive_types: BTreeSet<String>,
}

impl AuditRecorder {
    /// Creates a recorder with the default sensitive-type set.
    #[must_use]
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        let sensitive_types =
            SENSITIVE_RESOURCE_TYPES.iter().map(|name| (*name).to_string()).collect();
        Self {
            sink,
            sensitive_types,
        }
    }

    /// Creates a recorder with an explicit sensitive-type set.
    #[must_use]
    pub fn with_sensitive_types(
        sink: Arc<dyn AuditSink>,
        sensitive_types: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            sink,
            sensitive_types: sensitive_types.into_iter().collect(),
        }
    }

    /// Returns true when the type requires a full structured audit trail.
    #[must_use]
    pub fn is_sensitive(&self, resource_type: &ResourceType) -> bool {
        self.sensitive_types.contains(resource_type.as_str())
    }

    /// Records one operation outcome.
    ///
    /// Sensitive resource types produce a validated structured event sent to
    /// the sink; other types produce a log line and always succeed.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Construction`] when the event is structurally
    /// incomplete and [`AuditError::Sink`] when the sink rejects delivery.
    /// Both fail the encompassing operation.
    pub fn record_outcome(&self, outcome: &OperationOutcome) -> Result<(), AuditError> {
        if self.is_sensitive(&outcome.resource_type) {
            let event = build_event(outcome);
            event.validate()?;
            self.sink.send(&event)?;
            return Ok(());
        }
        let line = log_line(outcome);
        if outcome.succeeded {
            tracing::info!("{line}");
        } else {
            tracing::warn!("{line}");
        }
        Ok(())
    }
}

/// Renders the log line emitted for non-sensitive resource outcomes.
fn log_line(outcome: &OperationOutcome) -> String {
    let result_label = if outcome.succeeded { "successfully" } else { "with failure" };
    format!(
        "{} request for {} executed {} by userid {}",
        outcome.action.as_str(),
        outcome.request_path,
        result_label,
        outcome.actor_id,
    )
}

// ============================================================================
// SECTION: Event Construction
// ============================================================================

/// Builds the structured event for a sensitive-resource outcome.
fn build_event(outcome: &OperationOutcome) -> AuditEvent {
    let (audit_outcome, result_label) = if outcome.succeeded {
        (AuditOutcome::Success, "successfully")
    } else {
        (AuditOutcome::MajorFailure, "with failure")
    };
    let description = format!(
        "{} {} executed {}",
        outcome.resource_type,
        outcome.action.as_str(),
        result_label,
    );
    AuditEvent::new(AuditEventParams {
        outcome: audit_outcome,
        action: outcome.action,
        actor_id: outcome.actor_id.clone(),
        resource_type: outcome.resource_type.clone(),
        resource_id: outcome.resource_id.clone(),
        resource_label: outcome.resource_label.clone(),
        description,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only framing assertions."
    )]

    use super::log_line;
    use super::AuditActionCode;
    use super::OperationOutcome;

    fn outcome(succeeded: bool) -> OperationOutcome {
        OperationOutcome {
            succeeded,
            action: AuditActionCode::Read,
            actor_id: "practitioner-9".to_owned(),
            resource_type: "Observation".into(),
            resource_id: "obs-1".to_owned(),
            resource_label: Some("Observation/obs-1".to_owned()),
            request_path: "/Observation/obs-1".to_owned(),
        }
    }

    #[test]
    fn successful_outcomes_log_the_success_line() {
        assert_eq!(
            log_line(&outcome(true)),
            "read request for /Observation/obs-1 executed successfully by userid practitioner-9",
        );
    }

    #[test]
    fn failed_outcomes_log_the_failure_line() {
        assert_eq!(
            log_line(&outcome(false)),
            "read request for /Observation/obs-1 executed with failure by userid practitioner-9",
        );
    }
}
