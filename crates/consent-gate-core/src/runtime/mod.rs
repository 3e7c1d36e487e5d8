// crates/consent-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Consent Gate Runtimes
// Description: Pure decision runtimes built over the core types.
// Purpose: Expose the rule engine, policy evaluator, mutation guard, and test store.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime components implement the decision logic: claim-driven rule
//! building, named-policy evaluation, and consent mutation guarding. All of
//! them are safe to invoke concurrently for different requests; none hold
//! shared mutable state across requests.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod guard;
pub mod policy;
pub mod rules;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use guard::ConsentMutationGuard;
pub use guard::NotifyReceipt;
pub use policy::ConsentPolicyEvaluator;
pub use policy::HAS_CONSENT_POLICY;
pub use rules::AccessError;
pub use rules::DENY_RULE_NAME;
pub use rules::METADATA_RULE_NAME;
pub use rules::RuleEngine;
pub use store::InMemoryConsentStore;
