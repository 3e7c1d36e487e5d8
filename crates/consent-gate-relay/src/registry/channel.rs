// crates/consent-gate-relay/src/registry/channel.rs
// ============================================================================
// Module: Channel Consent Registry
// Description: Channel-based notifier for in-process observation.
// Purpose: Hand consent changes to a receiver, primarily for tests.
// Dependencies: consent-gate-core, std
// ============================================================================

//! ## Overview
//! [`ChannelConsentRegistry`] delivers consent changes into an
//! `std::sync::mpsc` channel so tests can observe exactly what the mutation
//! guard sent.
//!
//! ## Invariants
//! - Each successful notification enqueues exactly one cloned change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::mpsc::Sender;

use consent_gate_core::ConsentChange;
use consent_gate_core::ConsentRegistry;
use consent_gate_core::RegistryError;

// ============================================================================
// SECTION: Channel Consent Registry
// ============================================================================

/// Channel-based consent registry notifier.
#[derive(Debug)]
pub struct ChannelConsentRegistry {
    /// Sender used to enqueue delivered changes.
    sender: Mutex<Sender<ConsentChange>>,
}

impl ChannelConsentRegistry {
    /// Creates a channel notifier around the given sender.
    #[must_use]
    pub const fn new(sender: Sender<ConsentChange>) -> Self {
        Self {
            sender: Mutex::new(sender),
        }
    }
}

impl ConsentRegistry for ChannelConsentRegistry {
    fn notify(&self, change: &ConsentChange) -> Result<(), RegistryError> {
        let sender = self
            .sender
            .lock()
            .map_err(|_| RegistryError::NotifyFailed("channel mutex poisoned".to_string()))?;
        sender
            .send(change.clone())
            .map_err(|err| RegistryError::NotifyFailed(err.to_string()))
    }
}
