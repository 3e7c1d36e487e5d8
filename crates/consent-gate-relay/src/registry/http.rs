// crates/consent-gate-relay/src/registry/http.rs
// ============================================================================
// Module: HTTP Consent Registry
// Description: HTTP-backed notifier posting consent changes to a registry callback.
// Purpose: Mirror consent creation, update, and deletion to the external registry.
// Dependencies: consent-gate-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`HttpConsentRegistry`] posts each [`ConsentChange`] as JSON to the
//! registry's consent callback endpoint. Non-success status codes fail
//! closed as [`RegistryError::NotifyFailed`]; the caller decides whether a
//! lost notification aborts anything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use consent_gate_core::ConsentChange;
use consent_gate_core::ConsentRegistry;
use consent_gate_core::RegistryError;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Registry callback path receiving consent change notifications.
pub const CONSENT_CALLBACK_PATH: &str = "rest/v1/event/listener/callbacks/consent/consent";

/// Request timeout for callback deliveries.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: HTTP Consent Registry
// ============================================================================

/// HTTP-backed consent registry notifier.
#[derive(Debug, Clone)]
pub struct HttpConsentRegistry {
    /// HTTP client used for callback requests.
    client: Client,
    /// Fully resolved callback endpoint.
    endpoint: Url,
}

impl HttpConsentRegistry {
    /// Builds a notifier for the registry at the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotifyFailed`] when the base URL cannot be
    /// joined with the callback path or the HTTP client cannot be built.
    pub fn new(base: &Url) -> Result<Self, RegistryError> {
        let endpoint = base
            .join(CONSENT_CALLBACK_PATH)
            .map_err(|err| RegistryError::NotifyFailed(err.to_string()))?;
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(NOTIFY_TIMEOUT)
            .build()
            .map_err(|err| RegistryError::NotifyFailed(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
        })
    }

    /// Creates a notifier with a preconfigured client and endpoint.
    #[must_use]
    pub const fn with_client(client: Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
        }
    }

    /// Returns the resolved callback endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ConsentRegistry for HttpConsentRegistry {
    fn notify(&self, change: &ConsentChange) -> Result<(), RegistryError> {
        let body = serde_json::to_vec(change)
            .map_err(|err| RegistryError::NotifyFailed(err.to_string()))?;
        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| RegistryError::NotifyFailed(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RegistryError::NotifyFailed(format!(
                "http status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
