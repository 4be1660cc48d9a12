// crates/mock-responder-core/src/core/mod.rs
// ============================================================================
// Module: Mock Responder Core Types
// Description: Canonical operation, request, option, and response structures.
// Purpose: Provide stable, serializable types shared by all mock components.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe the endpoint contract ([`OperationDescriptor`]), the
//! annotated request ([`AnnotatedRequest`]), per-call overrides
//! ([`MockConfig`]), the negotiator's selection ([`NegotiationResult`]), and
//! the produced [`ResponseEnvelope`]. These types are the canonical source of
//! truth for any hosting server built on top of the mocker.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod negotiation;
pub mod operation;
pub mod options;
pub mod request;
pub mod response;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::OperationId;
pub use negotiation::NegotiationResult;
pub use negotiation::RequestValidity;
pub use operation::Example;
pub use operation::MediaContent;
pub use operation::OperationDescriptor;
pub use operation::ResponseDescriptor;
pub use options::MockConfig;
pub use options::MockOptions;
pub use options::MockSetting;
pub use request::AnnotatedRequest;
pub use request::HttpRequest;
pub use request::RequestUrl;
pub use request::Severity;
pub use request::ValidationRecord;
pub use request::Validations;
pub use response::CONTENT_TYPE_HEADER;
pub use response::ResponseEnvelope;
pub use response::TEXT_PLAIN;
