//! Config validation tests for mock-responder-config.
// crates/mock-responder-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Validate per-section rules for mock, generation, and audit.
// Purpose: Ensure invalid settings fail closed with actionable messages.
// =============================================================================

mod common;

use common::TestResult;
use common::assert_toml_invalid;

// ============================================================================
// SECTION: Mock Section
// ============================================================================

#[test]
fn mock_code_must_be_a_concrete_status() -> TestResult {
    for code in ["2XX", "default", "99", "600", "20", "2000"] {
        assert_toml_invalid(&format!("[mock]\ncode = \"{code}\"\n"), "mock.code must be")?;
    }
    Ok(())
}

#[test]
fn mock_media_type_must_have_subtype() -> TestResult {
    for media_type in ["json", "application/", "/json", ""] {
        assert_toml_invalid(
            &format!("[mock]\nmedia_type = \"{media_type}\"\n"),
            "mock.media_type must look like type/subtype",
        )?;
    }
    Ok(())
}

#[test]
fn mock_example_key_must_be_trimmed_and_non_empty() -> TestResult {
    assert_toml_invalid("[mock]\nexample_key = \"  \"\n", "mock.example_key must be non-empty")?;
    assert_toml_invalid(
        "[mock]\nexample_key = \" first\"\n",
        "mock.example_key must not have surrounding whitespace",
    )?;
    assert_toml_invalid(
        &format!("[mock]\nexample_key = \"{}\"\n", "k".repeat(257)),
        "mock.example_key exceeds max length",
    )?;
    Ok(())
}

#[test]
fn valid_mock_section_passes() -> TestResult {
    let config = common::config_from_toml(
        "[mock]\nmedia_type = \"application/problem+json; charset=utf-8\"\ncode = \"404\"\n",
    )?;
    config.validate().map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Generation Section
// ============================================================================

#[test]
fn seeded_strategy_requires_seed() -> TestResult {
    assert_toml_invalid(
        "[generation]\nstrategy = \"seeded\"\n",
        "generation.seed is required when strategy is seeded",
    )
}

#[test]
fn static_strategy_rejects_seed() -> TestResult {
    assert_toml_invalid(
        "[generation]\nseed = 3\n",
        "generation.seed is only valid when strategy is seeded",
    )
}

#[test]
fn max_depth_is_bounded() -> TestResult {
    for depth in [0, 65] {
        assert_toml_invalid(
            &format!("[generation]\nmax_depth = {depth}\n"),
            "generation.max_depth must be between 1 and 64",
        )?;
    }
    for depth in [1, 64] {
        let config = common::config_from_toml(&format!("[generation]\nmax_depth = {depth}\n"))?;
        config.validate().map_err(|err| err.to_string())?;
    }
    Ok(())
}

#[test]
fn max_nodes_is_bounded() -> TestResult {
    for nodes in [0, 10_000_001] {
        assert_toml_invalid(
            &format!("[generation]\nmax_nodes = {nodes}\n"),
            "generation.max_nodes must be between 1 and 10000000",
        )?;
    }
    for nodes in [1, 10_000_000] {
        let config = common::config_from_toml(&format!("[generation]\nmax_nodes = {nodes}\n"))?;
        config.validate().map_err(|err| err.to_string())?;
        if config.generator_config().max_nodes != nodes {
            return Err(format!("generator config dropped max_nodes {nodes}"));
        }
    }
    Ok(())
}

#[test]
fn timeout_is_bounded() -> TestResult {
    for timeout in [0, 60_001] {
        assert_toml_invalid(
            &format!("[generation]\ntimeout_ms = {timeout}\n"),
            "generation.timeout_ms must be between 1 and 60000",
        )?;
    }
    Ok(())
}

#[test]
fn unknown_strategy_fails_to_parse() -> TestResult {
    match common::config_from_toml("[generation]\nstrategy = \"chaotic\"\n") {
        Err(message) if message.contains("config parse error") => Ok(()),
        Err(message) => Err(format!("unexpected error {message}")),
        Ok(_) => Err("unknown strategy should not parse".to_string()),
    }
}

// ============================================================================
// SECTION: Audit Section
// ============================================================================

#[test]
fn file_sink_requires_path() -> TestResult {
    assert_toml_invalid("[audit]\nsink = \"file\"\n", "audit.path is required when sink is file")?;
    assert_toml_invalid("[audit]\nsink = \"file\"\npath = \"  \"\n", "audit.path must be non-empty")
}

#[test]
fn path_is_rejected_for_other_sinks() -> TestResult {
    assert_toml_invalid(
        "[audit]\nsink = \"stderr\"\npath = \"audit.jsonl\"\n",
        "audit.path is only valid when sink is file",
    )
}

#[test]
fn file_sink_path_components_are_limited() -> TestResult {
    assert_toml_invalid(
        &format!("[audit]\nsink = \"file\"\npath = \"logs/{}\"\n", "a".repeat(300)),
        "audit.path path component too long",
    )
}
