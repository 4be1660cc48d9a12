// crates/mock-responder-providers/src/negotiator.rs
// ============================================================================
// Module: HTTP Negotiator
// Description: Built-in response negotiation over declared responses.
// Purpose: Select status code, media type, and example or schema.
// Dependencies: mock-responder-core
// ============================================================================

//! ## Overview
//! [`HttpNegotiator`] resolves a response variant in three steps: pick the
//! response by code, pick the content by media type, then pick an example or
//! the schema. Valid requests honor caller options; invalid requests look for
//! a `400` (or `4XX`) response and ignore options entirely.
//!
//! ## Invariants
//! - Every successful result carries an example or a schema.
//! - Pattern codes such as `2XX` compare case-insensitively.
//! - Selection is deterministic for identical inputs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mock_responder_core::Example;
use mock_responder_core::MediaContent;
use mock_responder_core::MockOptions;
use mock_responder_core::NegotiationError;
use mock_responder_core::NegotiationResult;
use mock_responder_core::Negotiator;
use mock_responder_core::OperationDescriptor;
use mock_responder_core::ResponseDescriptor;

use crate::media::default_content;
use crate::media::select_content;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Pattern code covering every success status.
const SUCCESS_PATTERN: &str = "2XX";
/// Code used for validation failures.
const BAD_REQUEST_CODE: &str = "400";
/// Pattern code covering every client error status.
const CLIENT_ERROR_PATTERN: &str = "4XX";
/// Catch-all response code.
const DEFAULT_CODE: &str = "default";

// ============================================================================
// SECTION: Negotiator
// ============================================================================

/// Built-in negotiator over an operation's declared responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpNegotiator;

impl HttpNegotiator {
    /// Creates the negotiator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Negotiator for HttpNegotiator {
    fn negotiate_for_valid_request(
        &self,
        operation: &OperationDescriptor,
        options: &MockOptions,
    ) -> Result<NegotiationResult, NegotiationError> {
        let requested = options
            .code
            .as_deref()
            .and_then(|code| find_response(&operation.responses, code));
        let response = match requested {
            Some(response) => response,
            None => default_success_response(&operation.responses)
                .ok_or(NegotiationError::NoSuccessResponse)?,
        };
        negotiate_response(response, options)
    }

    fn negotiate_for_invalid_request(
        &self,
        responses: &[ResponseDescriptor],
    ) -> Result<NegotiationResult, NegotiationError> {
        let response = find_response(responses, BAD_REQUEST_CODE)
            .or_else(|| find_response(responses, CLIENT_ERROR_PATTERN))
            .ok_or(NegotiationError::NoErrorResponse)?;

        let with_example = response
            .contents
            .iter()
            .find_map(|content| content.examples.first().map(|example| (content, example)));
        if let Some((content, example)) = with_example {
            return Ok(example_result(response, content, example));
        }
        let with_schema = response
            .contents
            .iter()
            .find_map(|content| content.schema.as_ref().map(|schema| (content, schema)));
        if let Some((content, schema)) = with_schema {
            return Ok(NegotiationResult::from_schema(
                response.code.clone(),
                content.media_type.clone(),
                schema.clone(),
            ));
        }
        let media_type = response
            .contents
            .first()
            .map_or_else(String::new, |content| content.media_type.clone());
        Err(NegotiationError::NotGeneratable {
            media_type,
        })
    }
}

// ============================================================================
// SECTION: Response Selection
// ============================================================================

/// Finds a response by code, ignoring ASCII case.
fn find_response<'a>(responses: &'a [ResponseDescriptor], code: &str) -> Option<&'a ResponseDescriptor> {
    responses.iter().find(|response| response.code.trim().eq_ignore_ascii_case(code.trim()))
}

/// Picks the lowest concrete 2xx response, then `2XX`, then `default`.
fn default_success_response(responses: &[ResponseDescriptor]) -> Option<&ResponseDescriptor> {
    responses
        .iter()
        .filter(|response| is_concrete_success(&response.code))
        .min_by(|left, right| left.code.trim().cmp(right.code.trim()))
        .or_else(|| find_response(responses, SUCCESS_PATTERN))
        .or_else(|| find_response(responses, DEFAULT_CODE))
}

/// Returns true for three-digit codes in the 2xx class.
fn is_concrete_success(code: &str) -> bool {
    let code = code.trim();
    code.len() == 3 && code.starts_with('2') && code.bytes().all(|byte| byte.is_ascii_digit())
}

// ============================================================================
// SECTION: Content Selection
// ============================================================================

/// Negotiates content and body for a chosen response.
fn negotiate_response(
    response: &ResponseDescriptor,
    options: &MockOptions,
) -> Result<NegotiationResult, NegotiationError> {
    let content = match options.media_type.as_deref().filter(|value| !value.is_empty()) {
        Some(preferred) => select_content(&response.contents, preferred).ok_or_else(|| {
            NegotiationError::UnsupportedMediaType {
                media_type: preferred.to_string(),
            }
        })?,
        None => default_content(&response.contents).ok_or_else(|| NegotiationError::NoContent {
            code: response.code.clone(),
        })?,
    };

    if let Some(key) = options.example_key.as_deref() {
        let example = content.examples.iter().find(|example| example.key == key).ok_or_else(|| {
            NegotiationError::ExampleNotFound {
                media_type: content.media_type.clone(),
                example_key: key.to_string(),
            }
        })?;
        return Ok(example_result(response, content, example));
    }

    if options.dynamic {
        let schema = content.schema.clone().ok_or_else(|| NegotiationError::SchemaNotDefined {
            media_type: content.media_type.clone(),
        })?;
        return Ok(NegotiationResult::from_schema(
            response.code.clone(),
            content.media_type.clone(),
            schema,
        ));
    }

    if let Some(example) = content.examples.first() {
        return Ok(example_result(response, content, example));
    }
    content.schema.clone().map_or_else(
        || {
            Err(NegotiationError::NotGeneratable {
                media_type: content.media_type.clone(),
            })
        },
        |schema| {
            Ok(NegotiationResult::from_schema(
                response.code.clone(),
                content.media_type.clone(),
                schema,
            ))
        },
    )
}

/// Builds an example-backed result that keeps the content schema as fallback.
fn example_result(
    response: &ResponseDescriptor,
    content: &MediaContent,
    example: &Example,
) -> NegotiationResult {
    NegotiationResult {
        code: response.code.clone(),
        media_type: content.media_type.clone(),
        example: Some(example.clone()),
        schema: content.schema.clone(),
    }
}
