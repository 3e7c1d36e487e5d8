// crates/consent-gate-core/src/core/rule.rs
// ============================================================================
// Module: Access Rules
// Description: Ordered permit/deny rules scoped to actions, types, and compartments.
// Purpose: Provide the rule list model evaluated first-match-wins by enforcement points.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Rules are named permit/deny directives produced by the rule engine and
//! evaluated in list order by a downstream enforcement point. The first rule
//! matching the requested action, resource type, and instance determines the
//! outcome; when nothing matches the request is denied (fail closed).
//!
//! ## Invariants
//! - Identity-derived rule lists produced by the engine terminate in an
//!   unconditional deny rule with no permit after it; the capability-discovery
//!   list is the single permit-all rule.
//! - Rule names are stable, human-readable identifiers used for auditing and
//!   are never reused across semantically different rules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ResourceId;
use crate::core::identifiers::ResourceType;

// ============================================================================
// SECTION: Operations and Actions
// ============================================================================

/// Kind of operation requested against the resource layer.
///
/// # Invariants
/// - Variants are stable for rule-engine branching and audit labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOperation {
    /// Capability discovery / metadata negotiation.
    Metadata,
    /// Instance create.
    Create,
    /// Instance read.
    Read,
    /// Instance update.
    Update,
    /// Instance delete.
    Delete,
    /// Type-level search.
    Search,
}

/// Concrete action requested against a specific resource instance.
///
/// # Invariants
/// - Variants are stable for rule matching and audit labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    /// Create a new instance.
    Create,
    /// Read an existing instance.
    Read,
    /// Write (update) an existing instance.
    Write,
    /// Delete an existing instance.
    Delete,
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        };
        f.write_str(label)
    }
}

// ============================================================================
// SECTION: Rule Model
// ============================================================================

/// Effect applied when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleEffect {
    /// The matching request is permitted.
    Permit,
    /// The matching request is denied.
    Deny,
}

/// Action selector carried by a rule.
///
/// # Invariants
/// - `Any` matches every [`AccessAction`]; other variants match exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// Matches create actions.
    Create,
    /// Matches read actions.
    Read,
    /// Matches write actions.
    Write,
    /// Matches delete actions.
    Delete,
    /// Matches every action.
    Any,
}

impl RuleAction {
    /// Returns true when the selector matches the requested action.
    #[must_use]
    pub const fn matches(self, action: AccessAction) -> bool {
        matches!(
            (self, action),
            (Self::Any, _)
                | (Self::Create, AccessAction::Create)
                | (Self::Read, AccessAction::Read)
                | (Self::Write, AccessAction::Write)
                | (Self::Delete, AccessAction::Delete)
        )
    }
}

/// Reference to an ownership compartment (e.g. `Patient/52`).
///
/// # Invariants
/// - `resource_type` names the compartment-defining type, `id` its instance.
/// - Matching is exact string equality on both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompartmentRef {
    /// Compartment-defining resource type.
    pub resource_type: ResourceType,
    /// Compartment instance identifier.
    pub id: String,
}

impl CompartmentRef {
    /// Creates a compartment reference.
    #[must_use]
    pub fn new(resource_type: impl Into<ResourceType>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Returns the canonical `Type/id` reference string.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{}/{}", self.resource_type, self.id)
    }
}

impl fmt::Display for CompartmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

/// Instance scope selector carried by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleScope {
    /// Matches any instance of the rule's resource type.
    AnyInstance,
    /// Matches only instances belonging to the given compartment.
    Compartment {
        /// Owning compartment the instance must belong to.
        owner: CompartmentRef,
    },
}

/// Named permit/deny directive scoped to an action, resource type, and scope.
///
/// # Invariants
/// - `name` is a stable, human-readable identifier unique to this rule's semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable rule name used in audit and debug output.
    pub name: String,
    /// Effect applied when the rule matches.
    pub effect: RuleEffect,
    /// Action selector.
    pub action: RuleAction,
    /// Resource type the rule applies to, or `None` for all types.
    pub resource_type: Option<ResourceType>,
    /// Instance scope selector.
    pub scope: RuleScope,
}

impl Rule {
    /// Builds a permit rule for the given action, type, and scope.
    #[must_use]
    pub fn permit(
        name: impl Into<String>,
        action: RuleAction,
        resource_type: impl Into<ResourceType>,
        scope: RuleScope,
    ) -> Self {
        Self {
            name: name.into(),
            effect: RuleEffect::Permit,
            action,
            resource_type: Some(resource_type.into()),
            scope,
        }
    }

    /// Builds an unconditional permit-all rule.
    #[must_use]
    pub fn permit_all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: RuleEffect::Permit,
            action: RuleAction::Any,
            resource_type: None,
            scope: RuleScope::AnyInstance,
        }
    }

    /// Builds an unconditional deny-all rule.
    #[must_use]
    pub fn deny_all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: RuleEffect::Deny,
            action: RuleAction::Any,
            resource_type: None,
            scope: RuleScope::AnyInstance,
        }
    }

    /// Returns true when the rule matches the request.
    #[must_use]
    pub fn matches(&self, request: &AccessRequest) -> bool {
        if !self.action.matches(request.action) {
            return false;
        }
        if let Some(resource_type) = &self.resource_type
            && resource_type != &request.resource_type
        {
            return false;
        }
        match &self.scope {
            RuleScope::AnyInstance => true,
            RuleScope::Compartment {
                owner,
            } => request.compartments.contains(owner),
        }
    }
}

// ============================================================================
// SECTION: Access Requests and Decisions
// ============================================================================

/// One requested operation against one resource instance.
///
/// # Invariants
/// - `compartments` lists the compartments the instance belongs to, as
///   resolved by the resource layer; an empty list means no ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Requested action.
    pub action: AccessAction,
    /// Resource type of the target instance.
    pub resource_type: ResourceType,
    /// Target instance identifier (absent for create).
    pub resource_id: Option<ResourceId>,
    /// Compartments the target instance belongs to.
    pub compartments: Vec<CompartmentRef>,
}

/// Outcome of evaluating a rule list against one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AccessDecision {
    /// A permit rule matched first.
    Permitted {
        /// Name of the matching permit rule.
        rule: String,
    },
    /// A deny rule matched first, or nothing matched (fail closed).
    Denied {
        /// Name of the matching deny rule, or `None` when nothing matched.
        rule: Option<String>,
    },
}

impl AccessDecision {
    /// Returns true when the decision permits the request.
    #[must_use]
    pub const fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted { .. })
    }
}

// ============================================================================
// SECTION: Rule Set
// ============================================================================

/// Ordered rule list evaluated first-match-wins.
///
/// # Invariants
/// - Order is significant and preserved exactly as built by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    /// Rules in evaluation order.
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from an ordered rule list.
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
        }
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the number of rules in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when the set contains no rules.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates the request against the rules, first match wins.
    ///
    /// When no rule matches, the request is denied with no rule name
    /// (fail closed).
    #[must_use]
    pub fn decide(&self, request: &AccessRequest) -> AccessDecision {
        for rule in &self.rules {
            if rule.matches(request) {
                return match rule.effect {
                    RuleEffect::Permit => AccessDecision::Permitted {
                        rule: rule.name.clone(),
                    },
                    RuleEffect::Deny => AccessDecision::Denied {
                        rule: Some(rule.name.clone()),
                    },
                };
            }
        }
        AccessDecision::Denied {
            rule: None,
        }
    }
}
