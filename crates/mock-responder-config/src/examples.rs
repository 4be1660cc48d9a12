// crates/mock-responder-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for mock responder configuration. The output is
//! deterministic and always passes validation.

/// Returns a canonical example `mock-responder.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[mock]
media_type = "application/json"
# code = "200"
# example_key = "default"
dynamic = false

[generation]
strategy = "seeded"
seed = 7
max_depth = 16
max_nodes = 100000
timeout_ms = 2000

[audit]
sink = "stderr"
# sink = "file"
# path = "mock-responder-audit.jsonl"
"#,
    )
}
