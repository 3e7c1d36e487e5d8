// crates/consent-gate-server/src/lib.rs
// ============================================================================
// Module: Consent Gate Server
// Description: HTTP endpoint exposing named consent policies for internal callers.
// Purpose: Let trusted backend services execute consent checks over HTTP.
// Dependencies: consent-gate-core, axum, serde, thiserror, time, tokio, tracing
// ============================================================================

//! ## Overview
//! The server crate exposes the named-policy endpoint: internal services POST
//! an authorization context to `/policy/execute/name/{name}` and receive an
//! authorization verdict. Unknown policy names and negative verdicts are
//! visible errors, never silent permits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod server;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use config::ConfigError;
pub use config::PolicyServerConfig;
pub use server::PolicyEndpoint;
pub use server::PolicyExecution;
pub use server::PolicyServer;
pub use server::PolicyServerError;
