// crates/consent-gate-server/src/config.rs
// ============================================================================
// Module: Policy Server Configuration
// Description: Bind address, policy allow-list, and request limits.
// Purpose: Validate endpoint configuration before the server starts.
// Dependencies: consent-gate-core, serde, thiserror
// ============================================================================

//! ## Overview
//! Configuration for the named-policy endpoint. Validation happens once at
//! startup so request handling never sees an inconsistent allow-list or an
//! unparseable bind address.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;

use consent_gate_core::HAS_CONSENT_POLICY;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bind address for local deployments.
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default maximum request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Named-policy endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Policy names external callers may execute.
    #[serde(default = "default_allowed_policies")]
    pub allowed_policies: Vec<String>,
    /// Maximum allowed request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default policy allow-list.
fn default_allowed_policies() -> Vec<String> {
    vec![HAS_CONSENT_POLICY.to_string()]
}

/// Returns the default body size limit.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for PolicyServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_policies: default_allowed_policies(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl PolicyServerConfig {
    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bind address does not parse, the
    /// allow-list is empty or contains blank names, or the body limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("bind must be a socket address".to_string()))?;
        if self.allowed_policies.is_empty() {
            return Err(ConfigError::Invalid("allowed_policies must not be empty".to_string()));
        }
        if self.allowed_policies.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "allowed_policies must not contain blank names".to_string(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("max_body_bytes must be positive".to_string()));
        }
        Ok(())
    }
}
