// crates/consent-gate-core/tests/rules.rs
// ============================================================================
// Module: Rule Engine Tests
// Description: Validate claim-driven rule building and first-match evaluation.
// Purpose: Ensure rule lists are ordered, scoped, and fail closed.
// Dependencies: consent-gate-core
// ============================================================================

//! Rule engine behavior tests for every decision-table branch.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use consent_gate_core::AccessAction;
use consent_gate_core::AccessDecision;
use consent_gate_core::AccessError;
use consent_gate_core::AccessRequest;
use consent_gate_core::CONSENT_RESOURCE_TYPE;
use consent_gate_core::CompartmentRef;
use consent_gate_core::DENY_RULE_NAME;
use consent_gate_core::IdentityClaims;
use consent_gate_core::METADATA_RULE_NAME;
use consent_gate_core::ORGANIZATION_RESOURCE_TYPE;
use consent_gate_core::PRACTITIONER_RESOURCE_TYPE;
use consent_gate_core::RequestOperation;
use consent_gate_core::ResourceId;
use consent_gate_core::ResourceType;
use consent_gate_core::RuleEffect;
use consent_gate_core::RuleEngine;
use consent_gate_core::RuleSet;
use consent_gate_core::SUBJECT_RESOURCE_TYPE;

/// Builds a read request for an instance inside the given subject compartment.
fn read_request(resource_type: &str, id: &str, owner: &str) -> AccessRequest {
    AccessRequest {
        action: AccessAction::Read,
        resource_type: ResourceType::new(resource_type),
        resource_id: Some(ResourceId::new(id)),
        compartments: vec![CompartmentRef::new(SUBJECT_RESOURCE_TYPE, owner)],
    }
}

/// Tests metadata requests get a permit-all rule regardless of claims.
#[test]
fn metadata_requests_are_universally_readable() {
    let engine = RuleEngine::new();
    let rules = engine
        .build_rules(&IdentityClaims::empty(), RequestOperation::Metadata)
        .expect("metadata rules");

    assert_eq!(rules.rules()[0].name, METADATA_RULE_NAME);
    assert_eq!(rules.rules()[0].effect, RuleEffect::Permit);
}

/// Tests the metadata list is exactly the permit-all rule, nothing after it.
#[test]
fn metadata_rule_list_is_a_single_permit_all() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_subject("52");
    let rules = engine.build_rules(&claims, RequestOperation::Metadata).expect("metadata rules");

    assert_eq!(rules.len(), 1);
    assert_eq!(rules.rules()[0].name, METADATA_RULE_NAME);
    assert!(!rules.rules().iter().any(|rule| rule.effect == RuleEffect::Deny));
}

/// Tests subject claims produce a deny-terminated list with stable names.
#[test]
fn subject_rules_terminate_in_deny_all() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_subject("52");
    let rules = engine.build_rules(&claims, RequestOperation::Read).expect("subject rules");

    let names: Vec<&str> = rules.rules().iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(names, vec![
        "rule_create_patient_resource",
        "rule_read_own_patient_resource",
        "rule_update_own_patient_resource",
        "rule_create_consent_resource",
        "rule_read_consent_resource",
        "rule_update_consent_resource",
        "rule_delete_consent_resource",
        DENY_RULE_NAME,
    ]);
    let deny_index = names.len() - 1;
    for rule in &rules.rules()[..deny_index] {
        assert_eq!(rule.effect, RuleEffect::Permit);
    }
    assert_eq!(rules.rules()[deny_index].effect, RuleEffect::Deny);
}

/// Tests subjects read and write only inside their own compartment.
#[test]
fn subject_rules_grant_only_own_compartment() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_subject("52");
    let rules = engine.build_rules(&claims, RequestOperation::Read).expect("subject rules");

    let own = read_request(SUBJECT_RESOURCE_TYPE, "52", "52");
    assert!(rules.decide(&own).is_permitted());

    let other = read_request(SUBJECT_RESOURCE_TYPE, "99", "99");
    assert!(!rules.decide(&other).is_permitted());

    let mut write_other = read_request(SUBJECT_RESOURCE_TYPE, "99", "99");
    write_other.action = AccessAction::Write;
    assert!(!rules.decide(&write_other).is_permitted());
}

/// Tests subjects manage consent records of any instance at the rule layer.
#[test]
fn subject_rules_grant_consent_management() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_subject("52");
    let rules = engine.build_rules(&claims, RequestOperation::Read).expect("subject rules");

    for action in [AccessAction::Create, AccessAction::Read, AccessAction::Write, AccessAction::Delete]
    {
        let request = AccessRequest {
            action,
            resource_type: ResourceType::new(CONSENT_RESOURCE_TYPE),
            resource_id: Some(ResourceId::new("c-1")),
            compartments: Vec::new(),
        };
        assert!(rules.decide(&request).is_permitted(), "consent {action} should be permitted");
    }
}

/// Tests practitioner claims scope read/write to the practitioner compartment.
#[test]
fn practitioner_rules_scope_to_own_compartment() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_practitioner("p-7");
    let rules = engine.build_rules(&claims, RequestOperation::Read).expect("practitioner rules");

    let names: Vec<&str> = rules.rules().iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(names, vec![
        "rule_create_practitioner_resource",
        "rule_read_own_practitioner_resource",
        "rule_update_own_practitioner_resource",
        DENY_RULE_NAME,
    ]);

    let own = AccessRequest {
        action: AccessAction::Read,
        resource_type: ResourceType::new(PRACTITIONER_RESOURCE_TYPE),
        resource_id: Some(ResourceId::new("p-7")),
        compartments: vec![CompartmentRef::new(PRACTITIONER_RESOURCE_TYPE, "p-7")],
    };
    assert!(rules.decide(&own).is_permitted());

    let other = AccessRequest {
        action: AccessAction::Read,
        resource_type: ResourceType::new(PRACTITIONER_RESOURCE_TYPE),
        resource_id: Some(ResourceId::new("p-9")),
        compartments: vec![CompartmentRef::new(PRACTITIONER_RESOURCE_TYPE, "p-9")],
    };
    assert!(!rules.decide(&other).is_permitted());
}

/// Tests the subject branch shadows the practitioner branch when both are set.
#[test]
fn subject_branch_wins_over_practitioner_branch() {
    let engine = RuleEngine::new();
    let mut claims = IdentityClaims::for_subject("52");
    claims.practitioner_id = Some("p-7".into());
    let rules = engine.build_rules(&claims, RequestOperation::Read).expect("rules");

    assert_eq!(rules.rules()[0].name, "rule_create_patient_resource");
    assert!(!rules.rules().iter().any(|rule| rule.name.contains("practitioner")));
}

/// Tests admin roles grant organization management plus subject provisioning.
#[test]
fn admin_rules_grant_organization_and_provisioning() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_roles(["admin"]);
    let rules = engine.build_rules(&claims, RequestOperation::Read).expect("admin rules");

    let org_read = AccessRequest {
        action: AccessAction::Read,
        resource_type: ResourceType::new(ORGANIZATION_RESOURCE_TYPE),
        resource_id: Some(ResourceId::new("53")),
        compartments: Vec::new(),
    };
    assert!(rules.decide(&org_read).is_permitted());

    let subject_create = AccessRequest {
        action: AccessAction::Create,
        resource_type: ResourceType::new(SUBJECT_RESOURCE_TYPE),
        resource_id: None,
        compartments: Vec::new(),
    };
    assert!(rules.decide(&subject_create).is_permitted());

    let subject_delete = AccessRequest {
        action: AccessAction::Delete,
        resource_type: ResourceType::new(SUBJECT_RESOURCE_TYPE),
        resource_id: Some(ResourceId::new("52")),
        compartments: Vec::new(),
    };
    assert!(!rules.decide(&subject_delete).is_permitted());
}

/// Tests non-admin roles carry no usable identity signal.
#[test]
fn role_without_admin_is_unauthenticated() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_roles(["reporter"]);
    let result = engine.build_rules(&claims, RequestOperation::Read);

    assert_eq!(result.err(), Some(AccessError::Unauthenticated));
}

/// Tests empty claims fail with an unauthenticated error, not a deny list.
#[test]
fn empty_claims_are_unauthenticated() {
    let engine = RuleEngine::new();
    let result = engine.build_rules(&IdentityClaims::empty(), RequestOperation::Read);

    assert_eq!(result.err(), Some(AccessError::Unauthenticated));
}

/// Tests identical inputs always yield identical rule lists.
#[test]
fn rule_building_is_deterministic() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_subject("52");

    let first = engine.build_rules(&claims, RequestOperation::Read).expect("rules");
    let second = engine.build_rules(&claims, RequestOperation::Read).expect("rules");
    assert_eq!(first, second);
}

/// Tests an unrelated resource type hits the terminal deny rule.
#[test]
fn unrelated_resource_types_hit_terminal_deny() {
    let engine = RuleEngine::new();
    let claims = IdentityClaims::for_subject("52");
    let rules = engine.build_rules(&claims, RequestOperation::Read).expect("rules");

    let request = read_request("Observation", "o-1", "52");
    let decision = rules.decide(&request);
    assert_eq!(decision, AccessDecision::Denied {
        rule: Some(DENY_RULE_NAME.to_string()),
    });
}

/// Tests an empty rule set denies with no rule name (fail closed).
#[test]
fn empty_rule_set_fails_closed() {
    let rules = RuleSet::new(Vec::new());
    let request = read_request(SUBJECT_RESOURCE_TYPE, "52", "52");
    assert_eq!(rules.decide(&request), AccessDecision::Denied {
        rule: None,
    });
}
