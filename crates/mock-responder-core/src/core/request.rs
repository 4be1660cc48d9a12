// crates/mock-responder-core/src/core/request.rs
// ============================================================================
// Module: Annotated Requests
// Description: Incoming HTTP request plus upstream validation results.
// Purpose: Carry the request view the mocker needs without transport types.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The request validator runs before the mocker and records its failures in
//! [`Validations::input`]. An empty list marks the request as valid. The mocker
//! only reads these records; it never re-validates the request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::negotiation::RequestValidity;

// ============================================================================
// SECTION: Request
// ============================================================================

/// Incoming request annotated with validation results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotatedRequest {
    /// Request data as received by the hosting server.
    pub data: HttpRequest,
    /// Validation results recorded upstream.
    #[serde(default)]
    pub validations: Validations,
}

impl AnnotatedRequest {
    /// Creates a request with no recorded validation failures.
    #[must_use]
    pub fn valid(data: HttpRequest) -> Self {
        Self {
            data,
            validations: Validations::default(),
        }
    }

    /// Creates a request carrying the given validation failures.
    #[must_use]
    pub const fn with_failures(data: HttpRequest, input: Vec<ValidationRecord>) -> Self {
        Self {
            data,
            validations: Validations {
                input,
            },
        }
    }

    /// Returns the validity derived from the recorded input validations.
    #[must_use]
    pub fn validity(&self) -> RequestValidity {
        if self.validations.input.is_empty() {
            RequestValidity::Valid
        } else {
            RequestValidity::Invalid
        }
    }
}

/// Transport-neutral request data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HttpRequest {
    /// HTTP method.
    #[serde(default)]
    pub method: String,
    /// Request URL.
    #[serde(default)]
    pub url: RequestUrl,
    /// Request headers as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Decoded request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Creates request data for the method and path.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: RequestUrl {
                path: path.into(),
                query: None,
            },
            headers: None,
            body: None,
        }
    }

    /// Adds a header, keeping the name as given.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }

    /// Returns a header value; names compare case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}

/// Request URL components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestUrl {
    /// Request path.
    #[serde(default)]
    pub path: String,
    /// Parsed query parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, Vec<String>>>,
}

// ============================================================================
// SECTION: Validations
// ============================================================================

/// Validation results recorded for a request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validations {
    /// Input validation failures; empty means the request is valid.
    #[serde(default)]
    pub input: Vec<ValidationRecord>,
}

/// Single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Location of the failure (for example `["body", "name"]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    /// Machine-readable failure code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Failure severity.
    #[serde(default)]
    pub severity: Severity,
}

impl ValidationRecord {
    /// Creates an error-severity record with the given message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            code: None,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Validation severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Request violates the contract.
    #[default]
    Error,
    /// Request is suspicious but acceptable.
    Warning,
    /// Informational note.
    Info,
    /// Authoring hint.
    Hint,
}
