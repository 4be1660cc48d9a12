// crates/mock-responder-core/src/interfaces/mod.rs
// ============================================================================
// Module: Mock Responder Interfaces
// Description: Collaborator contracts for negotiation and example generation.
// Purpose: Define the seams the response orchestrator depends on.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the mocker reaches its collaborators without
//! embedding any negotiation or generation strategy. Implementations must be
//! deterministic for identical inputs unless they are explicitly seeded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::core::MockOptions;
use crate::core::NegotiationResult;
use crate::core::OperationDescriptor;
use crate::core::RequestValidity;
use crate::core::ResponseDescriptor;

// ============================================================================
// SECTION: Negotiator
// ============================================================================

/// Negotiation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    /// No success (2xx) response is declared.
    #[error("no 2XX response defined, cannot mock")]
    NoSuccessResponse,
    /// No usable error response is declared for an invalid request.
    #[error("no 400 response defined")]
    NoErrorResponse,
    /// The selected response declares no content.
    #[error("response {code} declares no content")]
    NoContent {
        /// Selected response code.
        code: String,
    },
    /// The requested media type is not declared.
    #[error("requested content type {media_type} is not defined in the schema")]
    UnsupportedMediaType {
        /// Requested media type.
        media_type: String,
    },
    /// The requested example key is not declared.
    #[error("response for content type {media_type} and example key {example_key} does not exist")]
    ExampleNotFound {
        /// Selected media type.
        media_type: String,
        /// Requested example key.
        example_key: String,
    },
    /// A dynamic response was forced but no schema is declared.
    #[error("tried to force a dynamic response for {media_type} but the schema is not defined")]
    SchemaNotDefined {
        /// Selected media type.
        media_type: String,
    },
    /// The content has neither examples nor a schema.
    #[error("not possible to generate a response for content type {media_type}")]
    NotGeneratable {
        /// Selected media type.
        media_type: String,
    },
    /// Negotiator-specific failure.
    #[error("negotiator error: {0}")]
    Negotiator(String),
}

/// Input for a single negotiation.
#[derive(Debug, Clone, Copy)]
pub struct NegotiationRequest<'a> {
    /// Validity of the request being mocked.
    pub validity: RequestValidity,
    /// Operation contract.
    pub operation: &'a OperationDescriptor,
    /// Effective mock options (ignored for invalid requests).
    pub options: &'a MockOptions,
}

/// Selects one response variant among an operation's declared responses.
pub trait Negotiator: Send + Sync {
    /// Selects a response for a request with no validation failures.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError`] when no response can be selected.
    fn negotiate_for_valid_request(
        &self,
        operation: &OperationDescriptor,
        options: &MockOptions,
    ) -> Result<NegotiationResult, NegotiationError>;

    /// Selects an error response for a request that failed validation.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError`] when no usable error response exists.
    fn negotiate_for_invalid_request(
        &self,
        responses: &[ResponseDescriptor],
    ) -> Result<NegotiationResult, NegotiationError>;

    /// Dispatches to the entry point matching the request validity.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError`] from the selected entry point.
    fn negotiate(
        &self,
        request: NegotiationRequest<'_>,
    ) -> Result<NegotiationResult, NegotiationError> {
        match request.validity {
            RequestValidity::Valid => {
                self.negotiate_for_valid_request(request.operation, request.options)
            }
            RequestValidity::Invalid => {
                self.negotiate_for_invalid_request(&request.operation.responses)
            }
        }
    }
}

// ============================================================================
// SECTION: Example Generator
// ============================================================================

/// Example generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The schema uses a construct the generator cannot synthesize.
    #[error("unsupported schema: {0}")]
    Unsupported(String),
    /// The schema nests deeper than the generator allows.
    #[error("schema nesting exceeds max depth {max_depth}")]
    DepthExceeded {
        /// Configured maximum depth.
        max_depth: usize,
    },
    /// Generator-specific failure.
    #[error("generator error: {0}")]
    Generator(String),
}

/// Produces a synthetic example value from a schema.
#[async_trait]
pub trait ExampleGenerator: Send + Sync {
    /// Generates a value for the schema, shaped for the target media type.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the schema cannot be synthesized.
    async fn generate(&self, schema: &Value, media_type: &str) -> Result<Value, GenerationError>;
}
