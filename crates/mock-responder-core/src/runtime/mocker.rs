// crates/mock-responder-core/src/runtime/mocker.rs
// ============================================================================
// Module: HTTP Mocker
// Description: Response orchestrator for mocked operations.
// Purpose: Pick, materialize, and audit exactly one response per request.
// Dependencies: crate::{core, interfaces, runtime}, thiserror, tokio
// ============================================================================

//! ## Overview
//! [`HttpMocker`] is the single canonical path from an annotated request to a
//! [`ResponseEnvelope`]. It checks preconditions, resolves the per-call
//! options, negotiates on the validity-specific path, and resolves the body
//! from a literal example or the generator.
//!
//! ## Invariants
//! - Every call yields an envelope or a typed [`MockError`].
//! - Invalid requests never fail because of negotiation; they fall back to a
//!   plain-text 400 diagnostic.
//! - No state is shared between calls beyond the audit sink.
//! - Dropping the returned future cancels a pending generation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::core::AnnotatedRequest;
use crate::core::CONTENT_TYPE_HEADER;
use crate::core::MockConfig;
use crate::core::NegotiationResult;
use crate::core::OperationDescriptor;
use crate::core::RequestValidity;
use crate::core::ResponseEnvelope;
use crate::interfaces::ExampleGenerator;
use crate::interfaces::GenerationError;
use crate::interfaces::NegotiationError;
use crate::interfaces::NegotiationRequest;
use crate::interfaces::Negotiator;
use crate::runtime::audit::BodySource;
use crate::runtime::audit::MockAuditEvent;
use crate::runtime::audit::MockAuditEventParams;
use crate::runtime::audit::MockAuditSink;
use crate::runtime::audit::MockOutcome;
use crate::runtime::audit::NoopMockAuditSink;
use crate::runtime::diagnostic::diagnostic_envelope;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP mocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HttpMockerConfig {
    /// Upper bound for a single generator call; `None` waits indefinitely.
    pub generation_timeout: Option<Duration>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Mock call errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// No operation was supplied.
    #[error("resource is not defined")]
    MissingResource,
    /// No request was supplied.
    #[error("http request is not defined")]
    MissingRequest,
    /// Negotiation failed for a valid request.
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
    /// The negotiator returned neither an example nor a schema.
    #[error("neither example nor schema is defined")]
    NoExampleOrSchema,
    /// The negotiated code is not an HTTP status code.
    #[error("negotiated status code is not valid: {0}")]
    InvalidStatusCode(String),
    /// The generator failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The generator exceeded the configured timeout.
    #[error("example generation timed out after {timeout_ms} ms")]
    GenerationTimedOut {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
    /// Validation records could not be serialized into a diagnostic.
    #[error("diagnostic encoding failed: {0}")]
    DiagnosticEncoding(String),
}

impl MockError {
    /// Returns a stable label for audit logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingResource => "missing_resource",
            Self::MissingRequest => "missing_request",
            Self::Negotiation(_) => "negotiation_failed",
            Self::NoExampleOrSchema => "no_example_or_schema",
            Self::InvalidStatusCode(_) => "invalid_status_code",
            Self::Generation(_) => "generation_failed",
            Self::GenerationTimedOut {
                ..
            } => "generation_timed_out",
            Self::DiagnosticEncoding(_) => "diagnostic_encoding",
        }
    }
}

// ============================================================================
// SECTION: Mocker
// ============================================================================

/// Envelope plus the facts recorded in the audit event.
struct Resolved {
    /// Produced envelope.
    envelope: ResponseEnvelope,
    /// Origin of the body.
    source: BodySource,
}

/// Response orchestrator for mocked operations.
pub struct HttpMocker<N, G> {
    /// Negotiator implementation.
    negotiator: N,
    /// Example generator implementation.
    generator: G,
    /// Audit sink receiving one event per call.
    audit: Arc<dyn MockAuditSink>,
    /// Mocker configuration.
    config: HttpMockerConfig,
}

impl<N, G> HttpMocker<N, G>
where
    N: Negotiator,
    G: ExampleGenerator,
{
    /// Creates a mocker with default configuration and no audit output.
    #[must_use]
    pub fn new(negotiator: N, generator: G) -> Self {
        Self {
            negotiator,
            generator,
            audit: Arc::new(NoopMockAuditSink),
            config: HttpMockerConfig::default(),
        }
    }

    /// Replaces the mocker configuration.
    #[must_use]
    pub const fn with_config(mut self, config: HttpMockerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn MockAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the negotiator.
    #[must_use]
    pub const fn negotiator(&self) -> &N {
        &self.negotiator
    }

    /// Returns the example generator.
    #[must_use]
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Produces the mocked response for a request.
    ///
    /// # Errors
    ///
    /// Returns [`MockError`] when preconditions fail, when negotiation fails
    /// for a valid request, when the negotiator breaks its contract, or when
    /// generation fails or times out.
    pub async fn mock(
        &self,
        operation: Option<&OperationDescriptor>,
        request: Option<&AnnotatedRequest>,
        config: Option<&MockConfig>,
    ) -> Result<ResponseEnvelope, MockError> {
        let result = self.resolve(operation, request, config).await;
        self.audit.record(&audit_event(operation, request, &result));
        result.map(|resolved| resolved.envelope)
    }

    /// Runs the state machine for one call.
    async fn resolve(
        &self,
        operation: Option<&OperationDescriptor>,
        request: Option<&AnnotatedRequest>,
        config: Option<&MockConfig>,
    ) -> Result<Resolved, MockError> {
        let operation = operation.ok_or(MockError::MissingResource)?;
        let request = request.ok_or(MockError::MissingRequest)?;

        let options = MockConfig::effective_options(config, request.data.header(CONTENT_TYPE_HEADER));
        let validity = request.validity();
        let negotiated = self.negotiator.negotiate(NegotiationRequest {
            validity,
            operation,
            options: &options,
        });
        let result = match (validity, negotiated) {
            (_, Ok(result)) => result,
            (RequestValidity::Invalid, Err(_)) => {
                return Ok(Resolved {
                    envelope: diagnostic_envelope(&request.validations.input)?,
                    source: BodySource::Diagnostic,
                });
            }
            (RequestValidity::Valid, Err(err)) => return Err(MockError::Negotiation(err)),
        };

        let (body, source) = self.resolve_body(&result).await?;
        let status_code = parse_status_code(&result.code)?;
        Ok(Resolved {
            envelope: ResponseEnvelope::new(status_code, result.media_type, body),
            source,
        })
    }

    /// Resolves the body from the literal example or the generator.
    async fn resolve_body(
        &self,
        result: &NegotiationResult,
    ) -> Result<(Value, BodySource), MockError> {
        if let Some(value) = result.example_value() {
            return Ok((value.clone(), BodySource::Example));
        }
        let schema = result.schema.as_ref().ok_or(MockError::NoExampleOrSchema)?;
        let body = self.generate(schema, &result.media_type).await?;
        Ok((body, BodySource::Generated))
    }

    /// Awaits the generator, bounded by the configured timeout.
    async fn generate(&self, schema: &Value, media_type: &str) -> Result<Value, MockError> {
        let generation = self.generator.generate(schema, media_type);
        let Some(limit) = self.config.generation_timeout else {
            return generation.await.map_err(MockError::from);
        };
        match tokio::time::timeout(limit, generation).await {
            Ok(generated) => generated.map_err(MockError::from),
            Err(_) => Err(MockError::GenerationTimedOut {
                timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a negotiated code into an HTTP status.
fn parse_status_code(code: &str) -> Result<u16, MockError> {
    match code.trim().parse::<u16>() {
        Ok(status) if (100 ..= 599).contains(&status) => Ok(status),
        _ => Err(MockError::InvalidStatusCode(code.to_string())),
    }
}

/// Builds the audit event for a finished call.
fn audit_event(
    operation: Option<&OperationDescriptor>,
    request: Option<&AnnotatedRequest>,
    result: &Result<Resolved, MockError>,
) -> MockAuditEvent {
    let (outcome, status_code, media_type, body_source, error_kind) = match result {
        Ok(resolved) => {
            let outcome = if resolved.source == BodySource::Diagnostic {
                MockOutcome::Diagnostic
            } else {
                MockOutcome::Served
            };
            (
                outcome,
                Some(resolved.envelope.status_code),
                resolved.envelope.content_type().map(str::to_string),
                Some(resolved.source),
                None,
            )
        }
        Err(err) => (MockOutcome::Failed, None, None, None, Some(err.kind())),
    };
    MockAuditEvent::new(MockAuditEventParams {
        operation_id: operation.and_then(|op| op.id.as_ref()).map(ToString::to_string),
        method: operation.map(|op| op.method.clone()),
        path: operation.map(|op| op.path.clone()),
        validity: request.map(AnnotatedRequest::validity),
        outcome,
        status_code,
        media_type,
        body_source,
        error_kind,
    })
}
