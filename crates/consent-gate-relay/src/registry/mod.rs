// crates/consent-gate-relay/src/registry/mod.rs
// ============================================================================
// Module: Consent Registry Notifiers
// Description: Concrete notifiers mirroring consent changes to external registries.
// Purpose: Deliver consent change payloads over HTTP, to logs, or to channels.
// Dependencies: consent-gate-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! Concrete [`consent_gate_core::ConsentRegistry`] implementations. The HTTP
//! notifier posts each change to the registry callback endpoint; the log and
//! channel notifiers exist for development and test observation.
//!
//! ## Invariants
//! - Notification is at-most-once; callers surface a lost delivery through
//!   the mutation guard's receipt instead of retrying here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod channel;
pub mod http;
pub mod log;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use channel::ChannelConsentRegistry;
pub use http::CONSENT_CALLBACK_PATH;
pub use http::HttpConsentRegistry;
pub use log::LogConsentRegistry;
