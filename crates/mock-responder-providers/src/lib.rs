// crates/mock-responder-providers/src/lib.rs
// ============================================================================
// Module: Mock Responder Providers
// Description: Built-in negotiator and example generator.
// Purpose: Provide zero-config collaborators for the HTTP mocker.
// Dependencies: mock-responder-core, rand, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! This crate ships the built-in implementations of the mocker's two seams:
//! [`HttpNegotiator`] selects a declared response variant and
//! [`SchemaExampleGenerator`] synthesizes bodies from JSON Schema. Both are
//! deterministic for identical inputs unless a seeded strategy is chosen.
//! Invariants:
//! - Negotiation never consults state beyond its inputs.
//! - Generation fails closed on unresolved references and runaway nesting or
//!   expansion.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod generator;
pub mod media;
pub mod negotiator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use generator::DEFAULT_MAX_DEPTH;
pub use generator::DEFAULT_MAX_NODES;
pub use generator::GenerationStrategy;
pub use generator::SchemaExampleGenerator;
pub use generator::SchemaExampleGeneratorConfig;
pub use negotiator::HttpNegotiator;

/// HTTP mocker wired with the built-in collaborators.
pub type BuiltinHttpMocker =
    mock_responder_core::HttpMocker<HttpNegotiator, SchemaExampleGenerator>;

/// Builds an HTTP mocker with the built-in negotiator and generator.
#[must_use]
pub fn builtin_mocker(config: SchemaExampleGeneratorConfig) -> BuiltinHttpMocker {
    mock_responder_core::HttpMocker::new(HttpNegotiator::new(), SchemaExampleGenerator::new(config))
}
