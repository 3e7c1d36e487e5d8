// crates/consent-gate-relay/src/registry/log.rs
// ============================================================================
// Module: Log Consent Registry
// Description: Log-only notifier recording consent changes without dispatch.
// Purpose: Persist change records for development and offline environments.
// Dependencies: consent-gate-core, serde_json, std
// ============================================================================

//! ## Overview
//! `LogConsentRegistry` writes one JSON record per consent change to a
//! writer and reports success. It never contacts an external registry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use consent_gate_core::ConsentChange;
use consent_gate_core::ConsentRegistry;
use consent_gate_core::RegistryError;
use serde_json::json;

// ============================================================================
// SECTION: Log Consent Registry
// ============================================================================

/// Log-only consent registry notifier.
pub struct LogConsentRegistry<W: Write + Send> {
    /// Output writer for change records.
    writer: Mutex<W>,
}

impl<W: Write + Send> LogConsentRegistry<W> {
    /// Creates a log notifier around the given writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> ConsentRegistry for LogConsentRegistry<W> {
    fn notify(&self, change: &ConsentChange) -> Result<(), RegistryError> {
        let record = json!({
            "event": "consent_change",
            "insert": change.insert,
            "subject_id": change.consent.subject_id,
            "organizations": change.consent.organizations,
            "period": change.consent.period,
        });
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| RegistryError::NotifyFailed("log writer mutex poisoned".to_string()))?;
        serde_json::to_writer(&mut *guard, &record)
            .map_err(|err| RegistryError::NotifyFailed(err.to_string()))?;
        guard.write_all(b"\n").map_err(|err| RegistryError::NotifyFailed(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}
