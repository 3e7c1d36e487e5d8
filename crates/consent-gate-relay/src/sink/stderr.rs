// crates/consent-gate-relay/src/sink/stderr.rs
// ============================================================================
// Module: Stderr Audit Sink
// Description: Audit sink writing JSON lines to standard error.
// Purpose: Provide a zero-configuration sink for local deployments.
// Dependencies: consent-gate-core, serde_json, std
// ============================================================================

//! ## Overview
//! [`StderrAuditSink`] writes each event as one JSON line to stderr so
//! deployments can route the trail through their process log collector.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use consent_gate_core::AuditEvent;
use consent_gate_core::AuditSink;
use consent_gate_core::AuditSinkError;

// ============================================================================
// SECTION: Stderr Audit Sink
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl StderrAuditSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AuditSink for StderrAuditSink {
    fn send(&self, event: &AuditEvent) -> Result<(), AuditSinkError> {
        let payload = serde_json::to_string(event)
            .map_err(|err| AuditSinkError::DeliveryFailed(err.to_string()))?;
        writeln!(std::io::stderr(), "{payload}")
            .map_err(|err| AuditSinkError::DeliveryFailed(err.to_string()))
    }
}
