// crates/mock-responder-core/src/core/negotiation.rs
// ============================================================================
// Module: Negotiation Results
// Description: Negotiator selection and request validity tags.
// Purpose: Carry the chosen (code, media type, example-or-schema) tuple.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`NegotiationResult`] is what a negotiator hands back to the mocker. The
//! mocker treats a result with neither an example nor a schema as a contract
//! violation of the negotiator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::operation::Example;

// ============================================================================
// SECTION: Validity
// ============================================================================

/// Validity of a request as recorded by upstream validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestValidity {
    /// No validation failures were recorded.
    Valid,
    /// At least one validation failure was recorded.
    Invalid,
}

// ============================================================================
// SECTION: Result
// ============================================================================

/// Response variant selected by a negotiator.
///
/// # Invariants
/// - At least one of `example` and `schema` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationResult {
    /// Selected status code as declared.
    pub code: String,
    /// Selected media type.
    pub media_type: String,
    /// Selected literal example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
    /// Schema to generate from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl NegotiationResult {
    /// Creates a result backed by a literal example.
    #[must_use]
    pub fn from_example(
        code: impl Into<String>,
        media_type: impl Into<String>,
        example: Example,
    ) -> Self {
        Self {
            code: code.into(),
            media_type: media_type.into(),
            example: Some(example),
            schema: None,
        }
    }

    /// Creates a result backed by a schema.
    #[must_use]
    pub fn from_schema(code: impl Into<String>, media_type: impl Into<String>, schema: Value) -> Self {
        Self {
            code: code.into(),
            media_type: media_type.into(),
            example: None,
            schema: Some(schema),
        }
    }

    /// Returns the literal example value when one is defined.
    #[must_use]
    pub fn example_value(&self) -> Option<&Value> {
        self.example.as_ref().and_then(|example| example.value.as_ref())
    }
}
