// crates/consent-gate-relay/src/sink/mod.rs
// ============================================================================
// Module: Audit Sinks
// Description: Concrete audit sink implementations for event delivery.
// Purpose: Route structured audit events to stderr, files, or channels.
// Dependencies: consent-gate-core, serde_json, std
// ============================================================================

//! ## Overview
//! Concrete [`consent_gate_core::AuditSink`] implementations. Every sink
//! serializes events as one JSON object per line so downstream pipelines can
//! consume the trail without a custom parser.
//!
//! ## Invariants
//! - Delivery is at-most-once; a failed delivery returns an error and is
//!   never retried by the sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod channel;
pub mod file;
pub mod noop;
pub mod stderr;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use channel::ChannelAuditSink;
pub use file::FileAuditSink;
pub use noop::NoopAuditSink;
pub use stderr::StderrAuditSink;
