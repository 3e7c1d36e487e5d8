// crates/consent-gate-relay/src/lib.rs
// ============================================================================
// Module: Consent Gate Relay
// Description: Audit-trail recorder plus concrete audit sinks and registry notifiers.
// Purpose: Deliver operation outcomes to external audit and registry systems.
// Dependencies: consent-gate-core, reqwest, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! The relay crate owns the outward-facing side of the decision layer: the
//! audit recorder that turns operation outcomes into structured events or log
//! lines, the concrete [`consent_gate_core::AuditSink`] implementations, and
//! the [`consent_gate_core::ConsentRegistry`] notifiers that mirror consent
//! changes to the external registry.
//!
//! Delivery is synchronous and at-most-once; nothing here queues or retries.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod recorder;
pub mod registry;
pub mod sink;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use recorder::AuditError;
pub use recorder::AuditRecorder;
pub use recorder::OperationOutcome;
pub use registry::CONSENT_CALLBACK_PATH;
pub use registry::ChannelConsentRegistry;
pub use registry::HttpConsentRegistry;
pub use registry::LogConsentRegistry;
pub use sink::ChannelAuditSink;
pub use sink::FileAuditSink;
pub use sink::NoopAuditSink;
pub use sink::StderrAuditSink;
