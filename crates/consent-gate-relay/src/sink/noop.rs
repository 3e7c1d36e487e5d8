// crates/consent-gate-relay/src/sink/noop.rs
// ============================================================================
// Module: Noop Audit Sink
// Description: Audit sink that discards every event.
// Purpose: Satisfy the sink seam where no audit trail is wanted.
// Dependencies: consent-gate-core
// ============================================================================

//! ## Overview
//! [`NoopAuditSink`] accepts and discards every event. Intended for local
//! development only; production deployments should configure a real sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use consent_gate_core::AuditEvent;
use consent_gate_core::AuditSink;
use consent_gate_core::AuditSinkError;

// ============================================================================
// SECTION: Noop Audit Sink
// ============================================================================

/// No-op audit sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl NoopAuditSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AuditSink for NoopAuditSink {
    fn send(&self, _event: &AuditEvent) -> Result<(), AuditSinkError> {
        Ok(())
    }
}
