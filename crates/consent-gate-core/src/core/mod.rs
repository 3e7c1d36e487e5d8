// crates/consent-gate-core/src/core/mod.rs
// ============================================================================
// Module: Consent Gate Core Types
// Description: Canonical claim, rule, consent, and audit structures.
// Purpose: Provide stable, serializable types for the decision layer.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Consent Gate core types define identity claims, access rules, consent
//! records, and audit events. These types are the canonical source of truth
//! for any derived API surfaces (HTTP endpoints or host-framework shims).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod claims;
pub mod consent;
pub mod context;
pub mod identifiers;
pub mod rule;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditActionCode;
pub use audit::AuditEvent;
pub use audit::AuditEventError;
pub use audit::AuditEventParams;
pub use audit::AuditOutcome;
pub use claims::ADMIN_ROLE;
pub use claims::IdentityClaims;
pub use consent::ConsentChange;
pub use consent::ConsentPeriod;
pub use consent::ConsentRecord;
pub use consent::ORGANIZATION_REFERENCE_PREFIX;
pub use consent::SUBJECT_REFERENCE_PREFIX;
pub use context::AuthorizationContext;
pub use context::ORGANIZATION_ID_KEY;
pub use context::PATIENT_ID_KEY;
pub use identifiers::CONSENT_RESOURCE_TYPE;
pub use identifiers::ORGANIZATION_RESOURCE_TYPE;
pub use identifiers::OrganizationId;
pub use identifiers::PRACTITIONER_RESOURCE_TYPE;
pub use identifiers::PractitionerId;
pub use identifiers::ResourceId;
pub use identifiers::ResourceType;
pub use identifiers::SENSITIVE_RESOURCE_TYPES;
pub use identifiers::SUBJECT_RESOURCE_TYPE;
pub use identifiers::SubjectId;
pub use rule::AccessAction;
pub use rule::AccessDecision;
pub use rule::AccessRequest;
pub use rule::CompartmentRef;
pub use rule::RequestOperation;
pub use rule::Rule;
pub use rule::RuleAction;
pub use rule::RuleEffect;
pub use rule::RuleScope;
pub use rule::RuleSet;
