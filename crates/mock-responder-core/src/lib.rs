// crates/mock-responder-core/src/lib.rs
// ============================================================================
// Module: Mock Responder Core Library
// Description: Public API surface for the Mock Responder core.
// Purpose: Expose core types, interfaces, and the response orchestrator.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Mock Responder core decides which response a simulated API endpoint returns
//! for an annotated request. It branches on the request's validation state,
//! delegates selection to a [`Negotiator`], and materializes the body either
//! from a literal example or through an [`ExampleGenerator`]. Collaborators are
//! reached through explicit interfaces so negotiation and generation strategies
//! can be swapped without touching the orchestrator.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ExampleGenerator;
pub use interfaces::GenerationError;
pub use interfaces::NegotiationError;
pub use interfaces::NegotiationRequest;
pub use interfaces::Negotiator;
pub use runtime::BodySource;
pub use runtime::FileMockAuditSink;
pub use runtime::HttpMocker;
pub use runtime::HttpMockerConfig;
pub use runtime::MockAuditEvent;
pub use runtime::MockAuditSink;
pub use runtime::MockError;
pub use runtime::MockOutcome;
pub use runtime::NoopMockAuditSink;
pub use runtime::StderrMockAuditSink;
