// crates/consent-gate-core/src/lib.rs
// ============================================================================
// Module: Consent Gate Core Library
// Description: Public API surface for the Consent Gate core.
// Purpose: Expose claim, rule, consent, and audit types plus decision runtimes.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Consent Gate core provides the attribute-based access-control decision
//! layer for clinical-record-style resources: an ordered rule engine driven
//! by verified identity claims, a consent validity policy evaluator, and the
//! audit event model. It is framework-agnostic and integrates through
//! explicit interfaces rather than embedding into a host server; enforcement
//! points adapt it via a thin shim.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AuditSink;
pub use interfaces::AuditSinkError;
pub use interfaces::ConsentRegistry;
pub use interfaces::ConsentStore;
pub use interfaces::ConsentStoreError;
pub use interfaces::RegistryError;
pub use runtime::AccessError;
pub use runtime::ConsentMutationGuard;
pub use runtime::ConsentPolicyEvaluator;
pub use runtime::DENY_RULE_NAME;
pub use runtime::HAS_CONSENT_POLICY;
pub use runtime::InMemoryConsentStore;
pub use runtime::METADATA_RULE_NAME;
pub use runtime::NotifyReceipt;
pub use runtime::RuleEngine;
