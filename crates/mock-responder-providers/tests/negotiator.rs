// crates/mock-responder-providers/tests/negotiator.rs
// ============================================================================
// Module: HTTP Negotiator Tests
// Description: Response, content, and body selection rules.
// Purpose: Pin the precedence rules of the built-in negotiator.
// Dependencies: mock-responder-core, mock-responder-providers, serde_json
// ============================================================================

//! ## Overview
//! Exercises [`HttpNegotiator`] against hand-built operations:
//! - Success code selection and explicit code overrides
//! - Media range matching and the JSON default
//! - Example key, dynamic, and default body precedence
//! - Error response selection for invalid requests

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use mock_responder_core::Example;
use mock_responder_core::MediaContent;
use mock_responder_core::MockOptions;
use mock_responder_core::NegotiationError;
use mock_responder_core::NegotiationRequest;
use mock_responder_core::Negotiator;
use mock_responder_core::OperationDescriptor;
use mock_responder_core::RequestValidity;
use mock_responder_core::ResponseDescriptor;
use mock_responder_providers::HttpNegotiator;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn json_content(example: serde_json::Value) -> MediaContent {
    MediaContent::new("application/json").with_example(Example::inline("first", example))
}

fn operation(responses: Vec<ResponseDescriptor>) -> OperationDescriptor {
    OperationDescriptor::new("get", "/todos", responses)
}

fn options() -> MockOptions {
    MockOptions::default()
}

fn negotiate_valid(
    operation: &OperationDescriptor,
    options: &MockOptions,
) -> Result<mock_responder_core::NegotiationResult, NegotiationError> {
    HttpNegotiator::new().negotiate(NegotiationRequest {
        validity: RequestValidity::Valid,
        operation,
        options,
    })
}

// ============================================================================
// SECTION: Response Selection
// ============================================================================

#[test]
fn lowest_success_code_is_chosen_by_default() {
    let operation = operation(vec![
        ResponseDescriptor::new("404", vec![json_content(json!({"missing": true}))]),
        ResponseDescriptor::new("201", vec![json_content(json!({"created": true}))]),
        ResponseDescriptor::new("200", vec![json_content(json!({"ok": true}))]),
    ]);

    let result = negotiate_valid(&operation, &options()).unwrap();

    assert_eq!(result.code, "200");
    assert_eq!(result.example_value(), Some(&json!({"ok": true})));
}

#[test]
fn success_pattern_then_default_are_fallbacks() {
    let pattern = operation(vec![
        ResponseDescriptor::new("default", vec![json_content(json!("default"))]),
        ResponseDescriptor::new("2xx", vec![json_content(json!("pattern"))]),
    ]);
    let catch_all =
        operation(vec![ResponseDescriptor::new("default", vec![json_content(json!("default"))])]);

    assert_eq!(negotiate_valid(&pattern, &options()).unwrap().code, "2xx");
    assert_eq!(negotiate_valid(&catch_all, &options()).unwrap().code, "default");
}

#[test]
fn missing_success_response_fails() {
    let operation =
        operation(vec![ResponseDescriptor::new("500", vec![json_content(json!({}))])]);

    let result = negotiate_valid(&operation, &options());

    assert_eq!(result, Err(NegotiationError::NoSuccessResponse));
}

#[test]
fn requested_code_wins_and_unknown_code_falls_back() {
    let operation = operation(vec![
        ResponseDescriptor::new("200", vec![json_content(json!("ok"))]),
        ResponseDescriptor::new("418", vec![json_content(json!("teapot"))]),
    ]);
    let teapot = MockOptions {
        code: Some("418".to_string()),
        ..options()
    };
    let unknown = MockOptions {
        code: Some("503".to_string()),
        ..options()
    };

    assert_eq!(negotiate_valid(&operation, &teapot).unwrap().code, "418");
    assert_eq!(negotiate_valid(&operation, &unknown).unwrap().code, "200");
}

// ============================================================================
// SECTION: Content Selection
// ============================================================================

#[test]
fn json_content_is_preferred_without_media_type() {
    let operation = operation(vec![ResponseDescriptor::new(
        "200",
        vec![
            MediaContent::new("application/xml").with_example(Example::inline("x", json!("<a/>"))),
            MediaContent::new("application/json; charset=utf-8")
                .with_example(Example::inline("j", json!({}))),
        ],
    )]);

    let result = negotiate_valid(&operation, &options()).unwrap();

    assert_eq!(result.media_type, "application/json; charset=utf-8");
}

#[test]
fn first_content_is_used_when_json_is_absent() {
    let operation = operation(vec![ResponseDescriptor::new(
        "200",
        vec![
            MediaContent::new("text/csv").with_example(Example::inline("c", json!("a,b"))),
            MediaContent::new("application/xml").with_example(Example::inline("x", json!("<a/>"))),
        ],
    )]);

    assert_eq!(negotiate_valid(&operation, &options()).unwrap().media_type, "text/csv");
}

#[test]
fn response_without_content_fails() {
    let operation = operation(vec![ResponseDescriptor::new("204", Vec::new())]);

    let result = negotiate_valid(&operation, &options());

    assert_eq!(
        result,
        Err(NegotiationError::NoContent {
            code: "204".to_string()
        })
    );
}

#[test]
fn media_ranges_prefer_exact_then_subtype_wildcard() {
    let operation = operation(vec![ResponseDescriptor::new(
        "200",
        vec![
            MediaContent::new("*/*").with_example(Example::inline("any", json!("any"))),
            MediaContent::new("text/*").with_example(Example::inline("text", json!("text"))),
            MediaContent::new("text/plain").with_example(Example::inline("plain", json!("plain"))),
        ],
    )]);
    let exact = MockOptions {
        media_type: Some("TEXT/PLAIN; charset=utf-8".to_string()),
        ..options()
    };
    let subtype = MockOptions {
        media_type: Some("text/html".to_string()),
        ..options()
    };
    let other = MockOptions {
        media_type: Some("image/png".to_string()),
        ..options()
    };

    assert_eq!(negotiate_valid(&operation, &exact).unwrap().media_type, "text/plain");
    assert_eq!(negotiate_valid(&operation, &subtype).unwrap().media_type, "text/*");
    assert_eq!(negotiate_valid(&operation, &other).unwrap().media_type, "*/*");
}

#[test]
fn preferred_wildcard_matches_declared_content() {
    let operation = operation(vec![ResponseDescriptor::new(
        "200",
        vec![MediaContent::new("application/xml").with_example(Example::inline("x", json!("<a/>")))],
    )]);
    let wildcard = MockOptions {
        media_type: Some("application/*".to_string()),
        ..options()
    };

    assert_eq!(negotiate_valid(&operation, &wildcard).unwrap().media_type, "application/xml");
}

#[test]
fn unmatched_media_type_fails() {
    let operation =
        operation(vec![ResponseDescriptor::new("200", vec![json_content(json!({}))])]);
    let xml = MockOptions {
        media_type: Some("application/xml".to_string()),
        ..options()
    };

    let result = negotiate_valid(&operation, &xml);

    assert_eq!(
        result,
        Err(NegotiationError::UnsupportedMediaType {
            media_type: "application/xml".to_string()
        })
    );
}

// ============================================================================
// SECTION: Body Selection
// ============================================================================

fn rich_operation() -> OperationDescriptor {
    operation(vec![ResponseDescriptor::new(
        "200",
        vec![
            MediaContent::new("application/json")
                .with_example(Example::inline("first", json!({"n": 1})))
                .with_example(Example::inline("second", json!({"n": 2})))
                .with_schema(json!({"type": "object"})),
        ],
    )])
}

#[test]
fn example_key_selects_named_example() {
    let second = MockOptions {
        example_key: Some("second".to_string()),
        ..options()
    };

    let result = negotiate_valid(&rich_operation(), &second).unwrap();

    assert_eq!(result.example_value(), Some(&json!({"n": 2})));
}

#[test]
fn unknown_example_key_fails() {
    let missing = MockOptions {
        example_key: Some("third".to_string()),
        ..options()
    };

    let result = negotiate_valid(&rich_operation(), &missing);

    assert_eq!(
        result,
        Err(NegotiationError::ExampleNotFound {
            media_type: "application/json".to_string(),
            example_key: "third".to_string(),
        })
    );
}

#[test]
fn example_key_wins_over_dynamic() {
    let both = MockOptions {
        example_key: Some("first".to_string()),
        dynamic: true,
        ..options()
    };

    let result = negotiate_valid(&rich_operation(), &both).unwrap();

    assert_eq!(result.example_value(), Some(&json!({"n": 1})));
}

#[test]
fn dynamic_returns_schema_only() {
    let dynamic = MockOptions {
        dynamic: true,
        ..options()
    };

    let result = negotiate_valid(&rich_operation(), &dynamic).unwrap();

    assert_eq!(result.example, None);
    assert_eq!(result.schema, Some(json!({"type": "object"})));
}

#[test]
fn dynamic_without_schema_fails() {
    let operation =
        operation(vec![ResponseDescriptor::new("200", vec![json_content(json!({}))])]);
    let dynamic = MockOptions {
        dynamic: true,
        ..options()
    };

    let result = negotiate_valid(&operation, &dynamic);

    assert_eq!(
        result,
        Err(NegotiationError::SchemaNotDefined {
            media_type: "application/json".to_string()
        })
    );
}

#[test]
fn default_body_prefers_first_example_then_schema() {
    let schema_only = operation(vec![ResponseDescriptor::new(
        "200",
        vec![MediaContent::new("application/json").with_schema(json!({"type": "string"}))],
    )]);
    let empty = operation(vec![ResponseDescriptor::new(
        "200",
        vec![MediaContent::new("application/json")],
    )]);

    let first = negotiate_valid(&rich_operation(), &options()).unwrap();
    let generated = negotiate_valid(&schema_only, &options()).unwrap();

    assert_eq!(first.example.unwrap().key, "first");
    assert_eq!(first.schema, Some(json!({"type": "object"})));
    assert_eq!(generated.example, None);
    assert_eq!(generated.schema, Some(json!({"type": "string"})));
    assert_eq!(
        negotiate_valid(&empty, &options()),
        Err(NegotiationError::NotGeneratable {
            media_type: "application/json".to_string()
        })
    );
}

// ============================================================================
// SECTION: Invalid Requests
// ============================================================================

#[test]
fn invalid_request_uses_bad_request_then_client_error_pattern() {
    let negotiator = HttpNegotiator::new();
    let explicit = vec![
        ResponseDescriptor::new("200", vec![json_content(json!("ok"))]),
        ResponseDescriptor::new("4XX", vec![json_content(json!("pattern"))]),
        ResponseDescriptor::new("400", vec![json_content(json!("bad"))]),
    ];
    let pattern = vec![ResponseDescriptor::new("4xx", vec![json_content(json!("pattern"))])];

    let chosen = negotiator.negotiate_for_invalid_request(&explicit).unwrap();
    let fallback = negotiator.negotiate_for_invalid_request(&pattern).unwrap();

    assert_eq!(chosen.code, "400");
    assert_eq!(chosen.example_value(), Some(&json!("bad")));
    assert_eq!(fallback.code, "4xx");
}

#[test]
fn invalid_request_ignores_mock_options() {
    let operation = operation(vec![
        ResponseDescriptor::new("200", vec![json_content(json!("ok"))]),
        ResponseDescriptor::new("400", vec![json_content(json!("bad"))]),
    ]);
    let options = MockOptions {
        media_type: Some("application/xml".to_string()),
        code: Some("200".to_string()),
        example_key: Some("missing".to_string()),
        dynamic: true,
    };

    let result = HttpNegotiator::new()
        .negotiate(NegotiationRequest {
            validity: RequestValidity::Invalid,
            operation: &operation,
            options: &options,
        })
        .unwrap();

    assert_eq!(result.code, "400");
    assert_eq!(result.example_value(), Some(&json!("bad")));
}

#[test]
fn invalid_request_falls_back_to_schema_content() {
    let responses = vec![ResponseDescriptor::new(
        "400",
        vec![
            MediaContent::new("text/plain"),
            MediaContent::new("application/problem+json")
                .with_schema(json!({"type": "object", "properties": {"title": {"type": "string"}}})),
        ],
    )];

    let result = HttpNegotiator::new().negotiate_for_invalid_request(&responses).unwrap();

    assert_eq!(result.media_type, "application/problem+json");
    assert!(result.example.is_none());
    assert!(result.schema.is_some());
}

#[test]
fn invalid_request_without_usable_error_response_fails() {
    let negotiator = HttpNegotiator::new();
    let none = vec![ResponseDescriptor::new("200", vec![json_content(json!("ok"))])];
    let empty = vec![ResponseDescriptor::new("400", vec![MediaContent::new("application/json")])];

    assert_eq!(
        negotiator.negotiate_for_invalid_request(&none),
        Err(NegotiationError::NoErrorResponse)
    );
    assert_eq!(
        negotiator.negotiate_for_invalid_request(&empty),
        Err(NegotiationError::NotGeneratable {
            media_type: "application/json".to_string()
        })
    );
}
