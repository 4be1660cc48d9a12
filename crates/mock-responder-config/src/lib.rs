// crates/mock-responder-config/src/lib.rs
// ============================================================================
// Module: Mock Responder Config Library
// Description: Canonical config model, validation, and examples.
// Purpose: Single source of truth for mock-responder.toml semantics.
// Dependencies: mock-responder-core, mock-responder-providers, serde, toml
// ============================================================================

//! ## Overview
//! `mock-responder-config` defines the configuration model for the mock
//! responder. It provides strict, fail-closed validation and accessors that
//! build the per-call options, mocker settings, generator settings, and audit
//! sink from a single `mock-responder.toml`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
