// crates/mock-responder-core/tests/support/mod.rs
// ============================================================================
// Module: Mocker Test Support
// Description: Scripted collaborators and fixtures for mocker tests.
// Purpose: Observe how the mocker drives its negotiator, generator, and sink.
// ============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use mock_responder_core::AnnotatedRequest;
use mock_responder_core::Example;
use mock_responder_core::ExampleGenerator;
use mock_responder_core::GenerationError;
use mock_responder_core::HttpMocker;
use mock_responder_core::HttpRequest;
use mock_responder_core::MediaContent;
use mock_responder_core::MockAuditEvent;
use mock_responder_core::MockAuditSink;
use mock_responder_core::MockOptions;
use mock_responder_core::NegotiationError;
use mock_responder_core::NegotiationResult;
use mock_responder_core::Negotiator;
use mock_responder_core::OperationDescriptor;
use mock_responder_core::RequestValidity;
use mock_responder_core::ResponseDescriptor;
use mock_responder_core::ValidationRecord;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Negotiator
// ============================================================================

/// Negotiator returning scripted results and recording each call.
pub struct ScriptedNegotiator {
    /// Result for valid requests.
    pub valid: Result<NegotiationResult, NegotiationError>,
    /// Result for invalid requests.
    pub invalid: Result<NegotiationResult, NegotiationError>,
    /// Validity and options of every call, in order.
    pub calls: Mutex<Vec<(RequestValidity, Option<MockOptions>)>>,
}

impl ScriptedNegotiator {
    pub fn new(
        valid: Result<NegotiationResult, NegotiationError>,
        invalid: Result<NegotiationResult, NegotiationError>,
    ) -> Self {
        Self {
            valid,
            invalid,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Negotiator answering valid requests only.
    pub fn valid(result: NegotiationResult) -> Self {
        Self::new(Ok(result), Err(NegotiationError::NoErrorResponse))
    }

    pub fn calls(&self) -> Vec<(RequestValidity, Option<MockOptions>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Negotiator for ScriptedNegotiator {
    fn negotiate_for_valid_request(
        &self,
        _operation: &OperationDescriptor,
        options: &MockOptions,
    ) -> Result<NegotiationResult, NegotiationError> {
        self.calls.lock().unwrap().push((RequestValidity::Valid, Some(options.clone())));
        self.valid.clone()
    }

    fn negotiate_for_invalid_request(
        &self,
        _responses: &[ResponseDescriptor],
    ) -> Result<NegotiationResult, NegotiationError> {
        self.calls.lock().unwrap().push((RequestValidity::Invalid, None));
        self.invalid.clone()
    }
}

// ============================================================================
// SECTION: Generators
// ============================================================================

/// Generator returning a scripted value and recording each call.
pub struct RecordingGenerator {
    /// Value or error returned by every call.
    pub output: Result<Value, GenerationError>,
    /// Schema and media type of every call, in order.
    pub calls: Mutex<Vec<(Value, String)>>,
}

impl RecordingGenerator {
    pub fn returning(value: Value) -> Self {
        Self {
            output: Ok(value),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            output: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Value, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExampleGenerator for RecordingGenerator {
    async fn generate(&self, schema: &Value, media_type: &str) -> Result<Value, GenerationError> {
        self.calls.lock().unwrap().push((schema.clone(), media_type.to_string()));
        self.output.clone()
    }
}

/// Generator that sleeps before answering and flags completion.
pub struct SlowGenerator {
    /// Time spent before answering.
    pub delay: Duration,
    /// Set once a call ran to completion.
    pub finished: Arc<AtomicBool>,
}

impl SlowGenerator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl ExampleGenerator for SlowGenerator {
    async fn generate(&self, _schema: &Value, _media_type: &str) -> Result<Value, GenerationError> {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(json!({"slow": true}))
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink keeping every event in memory.
#[derive(Default)]
pub struct CapturingAuditSink {
    /// Recorded events.
    pub events: Mutex<Vec<MockAuditEvent>>,
}

impl CapturingAuditSink {
    pub fn events(&self) -> Vec<MockAuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl MockAuditSink for CapturingAuditSink {
    fn record(&self, event: &MockAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Operation with a single JSON 200 response carrying `{ "id": 1 }`.
pub fn todo_operation() -> OperationDescriptor {
    OperationDescriptor::new(
        "get",
        "/todos/{id}",
        vec![ResponseDescriptor::new(
            "200",
            vec![
                MediaContent::new("application/json")
                    .with_example(Example::inline("first", json!({"id": 1})))
                    .with_schema(json!({"type": "object"})),
            ],
        )],
    )
    .with_id("getTodo")
}

pub fn valid_request() -> AnnotatedRequest {
    AnnotatedRequest::valid(HttpRequest::new("get", "/todos/1"))
}

pub fn invalid_request(messages: &[&str]) -> AnnotatedRequest {
    AnnotatedRequest::with_failures(
        HttpRequest::new("post", "/todos"),
        messages.iter().map(|message| ValidationRecord::error(*message)).collect(),
    )
}

pub fn example_result(code: &str, media_type: &str, value: Value) -> NegotiationResult {
    NegotiationResult::from_example(code, media_type, Example::inline("scripted", value))
}

pub fn schema_result(code: &str, media_type: &str, schema: Value) -> NegotiationResult {
    NegotiationResult::from_schema(code, media_type, schema)
}

pub fn mocker<G: ExampleGenerator>(
    negotiator: ScriptedNegotiator,
    generator: G,
) -> HttpMocker<ScriptedNegotiator, G> {
    HttpMocker::new(negotiator, generator)
}
