// crates/consent-gate-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Consent Store
// Description: Simple in-memory consent store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`ConsentStore`]
//! for tests and local demos. Records are kept in insertion order and the
//! latest record for a subject wins, matching the adapter contract. It is not
//! intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::core::ConsentRecord;
use crate::core::SubjectId;
use crate::interfaces::ConsentStore;
use crate::interfaces::ConsentStoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory consent store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConsentStore {
    /// Consent records in insertion order, protected by a mutex.
    records: Arc<Mutex<Vec<ConsentRecord>>>,
}

impl InMemoryConsentStore {
    /// Creates a new in-memory consent store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends a consent record.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentStoreError`] when the store mutex is poisoned.
    pub fn insert(&self, record: ConsentRecord) -> Result<(), ConsentStoreError> {
        self.records
            .lock()
            .map_err(|_| ConsentStoreError::Store("consent store mutex poisoned".to_string()))?
            .push(record);
        Ok(())
    }
}

impl ConsentStore for InMemoryConsentStore {
    fn retrieve_consent(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<ConsentRecord>, ConsentStoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| ConsentStoreError::Store("consent store mutex poisoned".to_string()))?;
        Ok(guard.iter().rev().find(|record| &record.subject_id == subject_id).cloned())
    }
}
