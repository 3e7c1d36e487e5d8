// crates/consent-gate-relay/src/sink/channel.rs
// ============================================================================
// Module: Channel Audit Sink
// Description: Channel-based audit sink for in-process observation.
// Purpose: Hand delivered events to a receiver, primarily for tests.
// Dependencies: consent-gate-core, std
// ============================================================================

//! ## Overview
//! [`ChannelAuditSink`] delivers events into an `std::sync::mpsc` channel so
//! tests and in-process consumers can observe exactly what was sent.
//!
//! ## Invariants
//! - Each successful delivery enqueues exactly one cloned event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::mpsc::Sender;

use consent_gate_core::AuditEvent;
use consent_gate_core::AuditSink;
use consent_gate_core::AuditSinkError;

// ============================================================================
// SECTION: Channel Audit Sink
// ============================================================================

/// Channel-based audit sink.
#[derive(Debug)]
pub struct ChannelAuditSink {
    /// Sender used to enqueue delivered events.
    sender: Mutex<Sender<AuditEvent>>,
}

impl ChannelAuditSink {
    /// Creates a channel sink around the given sender.
    #[must_use]
    pub const fn new(sender: Sender<AuditEvent>) -> Self {
        Self {
            sender: Mutex::new(sender),
        }
    }
}

impl AuditSink for ChannelAuditSink {
    fn send(&self, event: &AuditEvent) -> Result<(), AuditSinkError> {
        let sender = self
            .sender
            .lock()
            .map_err(|_| AuditSinkError::DeliveryFailed("channel mutex poisoned".to_string()))?;
        sender
            .send(event.clone())
            .map_err(|err| AuditSinkError::DeliveryFailed(err.to_string()))
    }
}
