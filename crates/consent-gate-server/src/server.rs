// crates/consent-gate-server/src/server.rs
// ============================================================================
// Module: Named-Policy Endpoint
// Description: Axum server executing allow-listed consent policies by name.
// Purpose: Answer authorization checks from trusted backend services.
// Dependencies: consent-gate-core, axum, serde, time, tokio, tracing
// ============================================================================

//! ## Overview
//! The endpoint accepts `POST /policy/execute/name/{name}` with a JSON
//! object body carrying the authorization context. Names outside the
//! configured allow-list and negative verdicts both map to 401 with an
//! `error_description` payload; store failures map to 500. A successful
//! check returns 200 with an empty body.
//!
//! ## Invariants
//! - Unknown policy names are visible errors, never silent permits.
//! - The verdict is computed against the wall clock at request time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use consent_gate_core::AuthorizationContext;
use consent_gate_core::ConsentPolicyEvaluator;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::config::PolicyServerConfig;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal server errors.
#[derive(Debug, Error)]
pub enum PolicyServerError {
    /// Configuration rejected at startup.
    #[error("config error: {0}")]
    Config(String),
    /// Transport-level failure while binding or serving.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Policy Endpoint
// ============================================================================

/// Outcome of executing one named policy.
#[derive(Debug, PartialEq, Eq)]
pub enum PolicyExecution {
    /// The policy authorized the context.
    Authorized,
    /// The policy name is outside the allow-list.
    UnknownPolicy {
        /// Error description returned to the caller.
        message: String,
    },
    /// The policy rejected the context.
    NotAuthorized,
    /// The consent store failed while evaluating.
    StoreFailure {
        /// Error description returned to the caller.
        message: String,
    },
}

/// Executes allow-listed policies against the consent evaluator.
pub struct PolicyEndpoint {
    /// Policy names external callers may execute.
    allowed_policies: Vec<String>,
    /// Evaluator answering consent-validity checks.
    evaluator: ConsentPolicyEvaluator,
}

impl PolicyEndpoint {
    /// Creates an endpoint over the given allow-list and evaluator.
    #[must_use]
    pub const fn new(allowed_policies: Vec<String>, evaluator: ConsentPolicyEvaluator) -> Self {
        Self {
            allowed_policies,
            evaluator,
        }
    }

    /// Executes one named policy against the context at the given instant.
    #[must_use]
    pub fn execute(
        &self,
        name: &str,
        context: &AuthorizationContext,
        now: OffsetDateTime,
    ) -> PolicyExecution {
        if !self.allowed_policies.iter().any(|allowed| allowed == name) {
            let message =
                format!("Policy name has to be one of {}", self.allowed_policies.join(", "));
            return PolicyExecution::UnknownPolicy {
                message,
            };
        }
        match self.evaluator.check_authorized(name, context, now) {
            Ok(true) => PolicyExecution::Authorized,
            Ok(false) => PolicyExecution::NotAuthorized,
            Err(err) => PolicyExecution::StoreFailure {
                message: err.to_string(),
            },
        }
    }
}

// ============================================================================
// SECTION: Policy Server
// ============================================================================

/// HTTP server wrapping the policy endpoint.
pub struct PolicyServer {
    /// Validated endpoint configuration.
    config: PolicyServerConfig,
    /// Shared endpoint state.
    endpoint: Arc<PolicyEndpoint>,
}

impl PolicyServer {
    /// Builds a server from configuration and an evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyServerError::Config`] when the configuration is
    /// invalid.
    pub fn new(
        config: PolicyServerConfig,
        evaluator: ConsentPolicyEvaluator,
    ) -> Result<Self, PolicyServerError> {
        config.validate().map_err(|err| PolicyServerError::Config(err.to_string()))?;
        let endpoint =
            Arc::new(PolicyEndpoint::new(config.allowed_policies.clone(), evaluator));
        Ok(Self {
            config,
            endpoint,
        })
    }

    /// Serves the endpoint until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), PolicyServerError> {
        let addr: SocketAddr = self
            .config
            .bind
            .parse()
            .map_err(|_| PolicyServerError::Config("invalid bind address".to_string()))?;
        let state = Arc::new(ServerState {
            endpoint: Arc::clone(&self.endpoint),
            max_body_bytes: self.config.max_body_bytes,
        });
        let app = Router::new()
            .route("/policy/execute/name/{name}", post(handle_execute))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| PolicyServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| PolicyServerError::Transport("http server failed".to_string()))
    }
}

// ============================================================================
// SECTION: HTTP Handling
// ============================================================================

/// Shared state for the execute handler.
struct ServerState {
    /// Endpoint executing named policies.
    endpoint: Arc<PolicyEndpoint>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

/// Error payload returned on rejected checks.
#[derive(Debug, Serialize)]
struct ErrorDescription {
    /// Human-readable rejection reason.
    error_description: String,
}

/// Handles `POST /policy/execute/name/{name}`.
async fn handle_execute(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    bytes: Bytes,
) -> Response {
    let (status, description) = execute_request(&state, &name, &bytes, OffsetDateTime::now_utc());
    match description {
        None => status.into_response(),
        Some(payload) => (status, axum::Json(payload)).into_response(),
    }
}

/// Maps one request onto a status code and optional error payload.
fn execute_request(
    state: &ServerState,
    name: &str,
    bytes: &Bytes,
    now: OffsetDateTime,
) -> (StatusCode, Option<ErrorDescription>) {
    if bytes.len() > state.max_body_bytes {
        return reject(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
    }
    let context: AuthorizationContext = if bytes.is_empty() {
        AuthorizationContext::default()
    } else {
        match serde_json::from_slice(bytes) {
            Ok(context) => context,
            Err(_) => {
                return reject(StatusCode::BAD_REQUEST, "Request body must be a JSON object");
            }
        }
    };
    tracing::debug!(policy = %name, "executing named policy");
    match state.endpoint.execute(name, &context, now) {
        PolicyExecution::Authorized => (StatusCode::OK, None),
        PolicyExecution::UnknownPolicy {
            message,
        } => reject(StatusCode::UNAUTHORIZED, &message),
        PolicyExecution::NotAuthorized => reject(StatusCode::UNAUTHORIZED, "Not Authorized!"),
        PolicyExecution::StoreFailure {
            message,
        } => {
            tracing::error!(policy = %name, error = %message, "consent store failure");
            reject(StatusCode::INTERNAL_SERVER_ERROR, &message)
        }
    }
}

/// Builds a rejection status with an error description payload.
fn reject(status: StatusCode, description: &str) -> (StatusCode, Option<ErrorDescription>) {
    let payload = ErrorDescription {
        error_description: description.to_string(),
    };
    (status, Some(payload))
}
