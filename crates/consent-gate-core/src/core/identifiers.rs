// crates/consent-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Consent Gate Identifiers
// Description: Canonical opaque identifiers for actors and resources.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout Consent Gate.
//! Identifiers are opaque UTF-8 strings extracted from verified credentials or
//! resource references; no normalization or validation is applied by these
//! types. Equality is exact string equality, which is the only matching mode
//! the decision layer supports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Subject identifier for a record subject (the person a record is about).
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a new subject identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Practitioner identifier for a clinical staff actor.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PractitionerId(String);

impl PractitionerId {
    /// Creates a new practitioner identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PractitionerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PractitionerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PractitionerId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Organization identifier for a consent-holding organization.
///
/// # Invariants
/// - Opaque UTF-8 string; the bare id without any reference prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Creates a new organization identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for OrganizationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OrganizationId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Resource instance identifier.
///
/// # Invariants
/// - Opaque UTF-8 string; the bare id without any resource-type prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a new resource identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Resource type name (e.g. `Patient`, `Consent`, `Organization`).
///
/// # Invariants
/// - Opaque UTF-8 string; matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    /// Creates a new resource type name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the type name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Well-Known Resource Types
// ============================================================================

/// Resource type holding subject demographic records.
pub const SUBJECT_RESOURCE_TYPE: &str = "Patient";

/// Resource type holding consent grants.
pub const CONSENT_RESOURCE_TYPE: &str = "Consent";

/// Resource type holding organization records.
pub const ORGANIZATION_RESOURCE_TYPE: &str = "Organization";

/// Resource type holding practitioner records.
pub const PRACTITIONER_RESOURCE_TYPE: &str = "Practitioner";

/// Resource types whose operations require a full structured audit trail.
pub const SENSITIVE_RESOURCE_TYPES: [&str; 1] = [SUBJECT_RESOURCE_TYPE];
