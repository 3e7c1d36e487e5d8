// crates/consent-gate-core/src/core/context.rs
// ============================================================================
// Module: Authorization Context
// Description: Opaque named-value mapping supplied to named policy checks.
// Purpose: Carry caller-provided policy inputs without schema assumptions.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The authorization context is an opaque mapping of named values supplied to
//! a named policy check. Policies read the keys they need and treat missing
//! keys as a deterministic not-authorized result, never as an error.
//! Values are untrusted caller input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Well-Known Keys
// ============================================================================

/// Context key naming the requesting organization.
pub const ORGANIZATION_ID_KEY: &str = "organization_id";

/// Context key naming the record subject.
pub const PATIENT_ID_KEY: &str = "patient_id";

// ============================================================================
// SECTION: Authorization Context
// ============================================================================

/// Opaque named-value mapping for one policy check.
///
/// # Invariants
/// - Request-scoped; no cross-request lifetime.
/// - Keys are matched exactly; values are opaque JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationContext {
    /// Named values keyed by exact string.
    values: BTreeMap<String, Value>,
}

impl AuthorizationContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Creates a context from a raw value map.
    #[must_use]
    pub const fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self {
            values,
        }
    }

    /// Inserts a named value, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the value for a key coerced to a string.
    ///
    /// Strings are returned as-is; numbers and booleans are rendered to their
    /// canonical string form. Other shapes yield `None`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns true when the context carries no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
