// crates/consent-gate-core/src/runtime/rules.rs
// ============================================================================
// Module: Rule Engine
// Description: Claim-driven construction of ordered allow/deny rule lists.
// Purpose: Turn verified identity claims into resource-scoped access rules.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The rule engine is a pure function from identity claims and the requested
//! operation kind to an ordered [`RuleSet`]. Capability-discovery requests
//! short-circuit to a single permit-all rule with no further checks; every
//! identity-derived branch comes from a priority table evaluated
//! first-guard-wins, with the terminal deny-all rule appended so the list
//! fails closed.
//!
//! The practitioner-scoped policy profile is canonical here. The historical
//! SMART-on-FHIR patient-scoped profile (read/write on the subject's own
//! record only, creation delegated to the identity provider) is a documented
//! alternative and is intentionally not merged into this chain.
//!
//! ## Invariants
//! - Deterministic: identical claims and operation always yield an identical
//!   rule list (same names, same order).
//! - Pure: claims are never mutated and no I/O is performed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CONSENT_RESOURCE_TYPE;
use crate::core::CompartmentRef;
use crate::core::IdentityClaims;
use crate::core::ORGANIZATION_RESOURCE_TYPE;
use crate::core::PRACTITIONER_RESOURCE_TYPE;
use crate::core::RequestOperation;
use crate::core::Rule;
use crate::core::RuleAction;
use crate::core::RuleScope;
use crate::core::RuleSet;
use crate::core::SUBJECT_RESOURCE_TYPE;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Decision-layer access errors.
///
/// # Invariants
/// - `Unauthenticated` is fatal to the request and never falls through to
///   deny-all rules, which would mask a credential-class problem as a
///   generic rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// Claims carry no usable identity signal.
    #[error("missing or invalid authorization claims")]
    Unauthenticated,
    /// An authenticated identity reached outside its own compartment.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

// ============================================================================
// SECTION: Rule Names
// ============================================================================

/// Terminal deny-all rule name.
pub const DENY_RULE_NAME: &str = "rule_deny_resource";

/// Metadata permit-all rule name.
pub const METADATA_RULE_NAME: &str = "rule_allow_all_metadata";

// ============================================================================
// SECTION: Decision Table
// ============================================================================

/// One branch of the priority-ordered decision table.
///
/// # Invariants
/// - `applies` is side-effect free; `build` emits only permit rules.
struct RuleBranch {
    /// Guard deciding whether the branch handles the claims.
    applies: fn(&IdentityClaims) -> bool,
    /// Builder producing the branch's permit rules.
    build: fn(&IdentityClaims) -> Vec<Rule>,
}

/// Priority-ordered decision table; the first branch whose guard holds wins.
const BRANCHES: [RuleBranch; 3] = [
    RuleBranch {
        applies: |claims| claims.subject_id.is_some(),
        build: subject_rules,
    },
    RuleBranch {
        applies: |claims| claims.practitioner_id.is_some(),
        build: practitioner_rules,
    },
    RuleBranch {
        applies: |claims| claims.has_admin_role(),
        build: |_| admin_rules(),
    },
];

// ============================================================================
// SECTION: Rule Engine
// ============================================================================

/// Builds ordered rule lists from verified identity claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Creates the rule engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the ordered rule list for one request.
    ///
    /// Capability-discovery requests return the single permit-all rule with
    /// no further checks. Otherwise the first branch whose guard holds
    /// produces the permit rules and the terminal deny-all rule is appended
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] when no branch applies,
    /// meaning the claims carry no usable identity signal.
    pub fn build_rules(
        &self,
        claims: &IdentityClaims,
        operation: RequestOperation,
    ) -> Result<RuleSet, AccessError> {
        if operation == RequestOperation::Metadata {
            return Ok(RuleSet::new(metadata_rules()));
        }
        for branch in &BRANCHES {
            if (branch.applies)(claims) {
                let mut rules = (branch.build)(claims);
                rules.push(Rule::deny_all(DENY_RULE_NAME));
                return Ok(RuleSet::new(rules));
            }
        }
        Err(AccessError::Unauthenticated)
    }
}

// ============================================================================
// SECTION: Branch Builders
// ============================================================================

/// Permit rules for capability-discovery requests.
///
/// Metadata must be universally readable so clients can negotiate
/// capabilities before authenticating a specific identity.
fn metadata_rules() -> Vec<Rule> {
    vec![Rule::permit_all(METADATA_RULE_NAME)]
}

/// Permit rules for a caller acting as a record subject.
///
/// The subject may register their own record, read and write only within
/// their own compartment, and fully manage consent grants. Cross-subject
/// consent access is rejected separately by the mutation guard.
fn subject_rules(claims: &IdentityClaims) -> Vec<Rule> {
    let Some(subject_id) = &claims.subject_id else {
        return Vec::new();
    };
    let own = CompartmentRef::new(SUBJECT_RESOURCE_TYPE, subject_id.as_str());
    vec![
        Rule::permit(
            "rule_create_patient_resource",
            RuleAction::Create,
            SUBJECT_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_read_own_patient_resource",
            RuleAction::Read,
            SUBJECT_RESOURCE_TYPE,
            RuleScope::Compartment {
                owner: own.clone(),
            },
        ),
        Rule::permit(
            "rule_update_own_patient_resource",
            RuleAction::Write,
            SUBJECT_RESOURCE_TYPE,
            RuleScope::Compartment {
                owner: own,
            },
        ),
        Rule::permit(
            "rule_create_consent_resource",
            RuleAction::Create,
            CONSENT_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_read_consent_resource",
            RuleAction::Read,
            CONSENT_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_update_consent_resource",
            RuleAction::Write,
            CONSENT_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_delete_consent_resource",
            RuleAction::Delete,
            CONSENT_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
    ]
}

/// Permit rules for a caller acting as a practitioner.
///
/// Registration needs create-any; everything else stays inside the
/// practitioner's own compartment.
fn practitioner_rules(claims: &IdentityClaims) -> Vec<Rule> {
    let Some(practitioner_id) = &claims.practitioner_id else {
        return Vec::new();
    };
    let own = CompartmentRef::new(PRACTITIONER_RESOURCE_TYPE, practitioner_id.as_str());
    vec![
        Rule::permit(
            "rule_create_practitioner_resource",
            RuleAction::Create,
            PRACTITIONER_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_read_own_practitioner_resource",
            RuleAction::Read,
            PRACTITIONER_RESOURCE_TYPE,
            RuleScope::Compartment {
                owner: own.clone(),
            },
        ),
        Rule::permit(
            "rule_update_own_practitioner_resource",
            RuleAction::Write,
            PRACTITIONER_RESOURCE_TYPE,
            RuleScope::Compartment {
                owner: own,
            },
        ),
    ]
}

/// Permit rules for the administrative role.
///
/// Organization management plus the minimal create/read grants the external
/// identity provider needs to register a subject record on first login and
/// look it up afterwards.
fn admin_rules() -> Vec<Rule> {
    vec![
        Rule::permit(
            "rule_create_organization_resource",
            RuleAction::Create,
            ORGANIZATION_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_read_organization_resource",
            RuleAction::Read,
            ORGANIZATION_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_update_organization_resource",
            RuleAction::Write,
            ORGANIZATION_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_create_patient_resource",
            RuleAction::Create,
            SUBJECT_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
        Rule::permit(
            "rule_read_patient_resource",
            RuleAction::Read,
            SUBJECT_RESOURCE_TYPE,
            RuleScope::AnyInstance,
        ),
    ]
}
