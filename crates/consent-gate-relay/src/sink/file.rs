// crates/consent-gate-relay/src/sink/file.rs
// ============================================================================
// Module: File Audit Sink
// Description: Append-only audit sink writing JSON lines to a file.
// Purpose: Persist the audit trail on local disk, one event per line.
// Dependencies: consent-gate-core, serde_json, std
// ============================================================================

//! ## Overview
//! [`FileAuditSink`] appends each event as one JSON line to a log file and
//! flushes after every write. The file handle is mutex-guarded so the sink
//! can be shared behind an `Arc` across request contexts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use consent_gate_core::AuditEvent;
use consent_gate_core::AuditSink;
use consent_gate_core::AuditSinkError;

// ============================================================================
// SECTION: File Audit Sink
// ============================================================================

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn send(&self, event: &AuditEvent) -> Result<(), AuditSinkError> {
        let payload = serde_json::to_string(event)
            .map_err(|err| AuditSinkError::DeliveryFailed(err.to_string()))?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| AuditSinkError::DeliveryFailed("audit file mutex poisoned".to_string()))?;
        writeln!(file, "{payload}")
            .map_err(|err| AuditSinkError::DeliveryFailed(err.to_string()))?;
        file.flush().map_err(|err| AuditSinkError::DeliveryFailed(err.to_string()))
    }
}
