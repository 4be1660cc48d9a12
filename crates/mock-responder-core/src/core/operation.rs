// crates/mock-responder-core/src/core/operation.rs
// ============================================================================
// Module: Operation Descriptors
// Description: Endpoint contract with its declared responses.
// Purpose: Describe every response variant a mocked operation may return.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! An [`OperationDescriptor`] is the read-only contract of one endpoint and
//! method. Responses keep their declaration order; negotiators rely on that
//! order when several candidates tie.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::OperationId;

// ============================================================================
// SECTION: Operation
// ============================================================================

/// Contract of a single endpoint and method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    /// Optional operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OperationId>,
    /// HTTP method, lowercase by convention.
    #[serde(default)]
    pub method: String,
    /// Path template (for example `/todos/{id}`).
    #[serde(default)]
    pub path: String,
    /// Declared responses in document order.
    #[serde(default)]
    pub responses: Vec<ResponseDescriptor>,
}

impl OperationDescriptor {
    /// Creates an operation with the given method, path, and responses.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        responses: Vec<ResponseDescriptor>,
    ) -> Self {
        Self {
            id: None,
            method: method.into(),
            path: path.into(),
            responses,
        }
    }

    /// Sets the operation identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<OperationId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// One declared response of an operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    /// Status code (`"200"`), class pattern (`"4XX"`), or `"default"`.
    pub code: String,
    /// Media type entries for this response.
    #[serde(default)]
    pub contents: Vec<MediaContent>,
}

impl ResponseDescriptor {
    /// Creates a response for the given code.
    #[must_use]
    pub fn new(code: impl Into<String>, contents: Vec<MediaContent>) -> Self {
        Self {
            code: code.into(),
            contents,
        }
    }
}

/// Body definition for one media type of a response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaContent {
    /// MIME type of the body.
    pub media_type: String,
    /// Literal examples in declaration order.
    #[serde(default)]
    pub examples: Vec<Example>,
    /// JSON Schema describing the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl MediaContent {
    /// Creates an empty content entry for the media type.
    #[must_use]
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            examples: Vec::new(),
            schema: None,
        }
    }

    /// Appends a literal example.
    #[must_use]
    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    /// Sets the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Pre-authored sample body.
///
/// # Invariants
/// - `value == None` means the value is undefined (for example an external
///   example that was not inlined); callers must not treat it as JSON `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Example key, unique within its media content.
    pub key: String,
    /// Inline value, absent when undefined. An explicit JSON `null` is defined.
    #[serde(
        default,
        deserialize_with = "deserialize_defined",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    /// Optional short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External location of the value when not inlined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
}

impl Example {
    /// Creates an inline example.
    #[must_use]
    pub fn inline(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
            ..Self::default()
        }
    }

    /// Creates an external example whose value is undefined at this layer.
    #[must_use]
    pub fn external(key: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            external_value: Some(location.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Keeps an explicit `null` as a defined value; only a missing field is undefined.
fn deserialize_defined<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
