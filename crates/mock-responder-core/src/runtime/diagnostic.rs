// crates/mock-responder-core/src/runtime/diagnostic.rs
// ============================================================================
// Module: Invalid Request Diagnostics
// Description: Best-effort 400 response for unmockable invalid requests.
// Purpose: Turn a failed error-response negotiation into a readable reply.
// Dependencies: crate::core, serde_jcs
// ============================================================================

//! ## Overview
//! When a request failed validation and the operation declares no usable
//! error response, the client still receives a 400 carrying the original
//! validation records. Records are serialized as canonical JSON (JCS) so the
//! diagnostic text is stable across runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::ResponseEnvelope;
use crate::core::TEXT_PLAIN;
use crate::core::ValidationRecord;
use crate::runtime::mocker::MockError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status code of the diagnostic response.
pub const DIAGNOSTIC_STATUS_CODE: u16 = 400;

/// Leading line of every diagnostic body.
pub const DIAGNOSTIC_HEADLINE: &str = "ERROR: Your request is not valid.";

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds the diagnostic body text for the validation records.
///
/// # Errors
///
/// Returns [`MockError::DiagnosticEncoding`] when the records cannot be
/// serialized.
pub fn diagnostic_body(validations: &[ValidationRecord]) -> Result<String, MockError> {
    let serialized = serde_jcs::to_string(validations)
        .map_err(|err| MockError::DiagnosticEncoding(err.to_string()))?;
    Ok(format!(
        "{DIAGNOSTIC_HEADLINE}\nWe cannot generate a sensible response because your '400'\nresponse \
         has neither example nor schema or is not defined.\nHere is the original validation \
         result instead: {serialized}"
    ))
}

/// Builds the plain-text 400 envelope for the validation records.
///
/// # Errors
///
/// Returns [`MockError::DiagnosticEncoding`] when the records cannot be
/// serialized.
pub fn diagnostic_envelope(validations: &[ValidationRecord]) -> Result<ResponseEnvelope, MockError> {
    let body = diagnostic_body(validations)?;
    Ok(ResponseEnvelope::new(DIAGNOSTIC_STATUS_CODE, TEXT_PLAIN, Value::String(body)))
}
