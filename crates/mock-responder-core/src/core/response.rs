// crates/mock-responder-core/src/core/response.rs
// ============================================================================
// Module: Response Envelope
// Description: Final mocked response handed back to the hosting server.
// Purpose: Provide the single externally visible artifact of a mock call.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Envelopes are built fresh per call and carry no lifecycle. They serialize
//! as `{ statusCode, headers, body }` so hosting servers can forward them
//! without reshaping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header name used for the response media type.
pub const CONTENT_TYPE_HEADER: &str = "Content-type";
/// Media type of diagnostic responses.
pub const TEXT_PLAIN: &str = "text/plain";

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Mocked HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Response body.
    pub body: Value,
}

impl ResponseEnvelope {
    /// Creates an envelope whose only header is the content type.
    #[must_use]
    pub fn new(status_code: u16, media_type: impl Into<String>, body: Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_string(), media_type.into());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Returns the content type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE_HEADER).map(String::as_str)
    }
}
