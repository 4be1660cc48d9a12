// crates/mock-responder-core/src/runtime/mod.rs
// ============================================================================
// Module: Mock Responder Runtime
// Description: Response orchestrator, invalid-request diagnostics, and audit.
// Purpose: Execute mock calls against negotiators and example generators.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the mock call itself. Hosting servers must go
//! through [`HttpMocker`] so every response follows the same precedence and
//! fallback rules.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod diagnostic;
pub mod mocker;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::BodySource;
pub use audit::FileMockAuditSink;
pub use audit::MockAuditEvent;
pub use audit::MockAuditEventParams;
pub use audit::MockAuditSink;
pub use audit::MockOutcome;
pub use audit::NoopMockAuditSink;
pub use audit::StderrMockAuditSink;
pub use diagnostic::DIAGNOSTIC_HEADLINE;
pub use diagnostic::DIAGNOSTIC_STATUS_CODE;
pub use diagnostic::diagnostic_body;
pub use diagnostic::diagnostic_envelope;
pub use mocker::HttpMocker;
pub use mocker::HttpMockerConfig;
pub use mocker::MockError;
