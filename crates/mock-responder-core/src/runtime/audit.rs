// crates/mock-responder-core/src/runtime/audit.rs
// ============================================================================
// Module: Mock Audit Logging
// Description: Structured audit events for mock response handling.
// Purpose: Emit one JSON-lines record per mock call without hard dependencies.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every call to [`HttpMocker::mock`](crate::runtime::HttpMocker::mock)
//! produces exactly one [`MockAuditEvent`]. Sinks are intentionally
//! lightweight so deployments can route events to their preferred logging
//! pipeline. Sink failures are swallowed; logging never changes a mock
//! outcome. Bodies are never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

use crate::core::RequestValidity;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a mock call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MockOutcome {
    /// A negotiated response was served.
    Served,
    /// The invalid-request diagnostic was served.
    Diagnostic,
    /// The call failed with an error.
    Failed,
}

/// Origin of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySource {
    /// Literal example value.
    Example,
    /// Value produced by the example generator.
    Generated,
    /// Diagnostic text for an invalid request.
    Diagnostic,
}

/// Mock audit event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockAuditEvent {
    /// Event identifier.
    pub event: String,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operation identifier when declared.
    pub operation_id: Option<String>,
    /// Operation method when an operation was supplied.
    pub method: Option<String>,
    /// Operation path when an operation was supplied.
    pub path: Option<String>,
    /// Request validity when a request was supplied.
    pub validity: Option<RequestValidity>,
    /// Call outcome.
    pub outcome: MockOutcome,
    /// Response status code on success.
    pub status_code: Option<u16>,
    /// Response media type on success.
    pub media_type: Option<String>,
    /// Body origin on success.
    pub body_source: Option<BodySource>,
    /// Error kind label on failure.
    pub error_kind: Option<String>,
}

/// Inputs required to construct a mock audit event.
pub struct MockAuditEventParams {
    /// Operation identifier when declared.
    pub operation_id: Option<String>,
    /// Operation method when an operation was supplied.
    pub method: Option<String>,
    /// Operation path when an operation was supplied.
    pub path: Option<String>,
    /// Request validity when a request was supplied.
    pub validity: Option<RequestValidity>,
    /// Call outcome.
    pub outcome: MockOutcome,
    /// Response status code on success.
    pub status_code: Option<u16>,
    /// Response media type on success.
    pub media_type: Option<String>,
    /// Body origin on success.
    pub body_source: Option<BodySource>,
    /// Error kind label on failure.
    pub error_kind: Option<&'static str>,
}

impl MockAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: MockAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "mock_response".to_string(),
            timestamp_ms,
            operation_id: params.operation_id,
            method: params.method,
            path: params.path,
            validity: params.validity,
            outcome: params.outcome,
            status_code: params.status_code,
            media_type: params.media_type,
            body_source: params.body_source,
            error_kind: params.error_kind.map(str::to_string),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for mock response events.
pub trait MockAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &MockAuditEvent);
}

/// Audit sink that discards events.
pub struct NoopMockAuditSink;

impl MockAuditSink for NoopMockAuditSink {
    fn record(&self, _event: &MockAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrMockAuditSink;

impl MockAuditSink for StderrMockAuditSink {
    fn record(&self, event: &MockAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileMockAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileMockAuditSink {
    /// Opens the audit log file in append mode.
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

impl MockAuditSink for FileMockAuditSink {
    fn record(&self, event: &MockAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
