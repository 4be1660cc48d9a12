// crates/mock-responder-providers/src/generator.rs
// ============================================================================
// Module: Schema Example Generator
// Description: Built-in example synthesis from JSON Schema values.
// Purpose: Produce bodies for responses that declare a schema but no example.
// Dependencies: mock-responder-core, rand, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! [`SchemaExampleGenerator`] walks a JSON Schema and builds a value that the
//! schema accepts. Literal hints (`const`, `examples`, `example`, `default`,
//! `enum`) win over structural synthesis. The static strategy is fully
//! deterministic; the seeded strategy draws choices from a seeded RNG so that
//! a seed reproduces the same sequence of bodies.
//!
//! ## Invariants
//! - `$ref` is never resolved here and always fails as unsupported.
//! - Nesting deeper than `max_depth` fails instead of recursing further.
//! - One call produces at most `max_nodes` values across all nesting levels.
//! - `text/*` targets always receive a JSON string.
//! - Async generation runs on the blocking pool and stops at the next value
//!   once its future is dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use mock_responder_core::ExampleGenerator;
use mock_responder_core::GenerationError;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::media::is_text;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum schema nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Default maximum number of values generated by one call.
pub const DEFAULT_MAX_NODES: usize = 100_000;

/// Maximum generated string length.
const MAX_STRING_LENGTH: usize = 4096;

/// Maximum generated array length.
const MAX_ARRAY_ITEMS: usize = 1024;

/// Most extra array items the seeded strategy adds past the minimum.
const MAX_EXTRA_ITEMS: usize = 2;

/// Base text for unformatted strings.
const SAMPLE_STRING: &str = "string";

/// 2^63, the first float outside the `i64` range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// How the generator resolves choices between valid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum GenerationStrategy {
    /// Always take the first option and the smallest valid value.
    #[default]
    Static,
    /// Draw choices from an RNG seeded once at construction.
    Seeded {
        /// RNG seed.
        seed: u64,
    },
}

/// Configuration for the schema example generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaExampleGeneratorConfig {
    /// Choice strategy.
    #[serde(flatten)]
    pub strategy: GenerationStrategy,
    /// Maximum schema nesting depth.
    pub max_depth: usize,
    /// Maximum number of values generated by one call.
    pub max_nodes: usize,
}

impl Default for SchemaExampleGeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: GenerationStrategy::Static,
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Example generator for JSON Schema values.
pub struct SchemaExampleGenerator {
    /// Generator configuration.
    config: SchemaExampleGeneratorConfig,
    /// Random source for the seeded strategy.
    rng: Option<Arc<Mutex<StdRng>>>,
}

impl SchemaExampleGenerator {
    /// Creates a generator for the given configuration.
    #[must_use]
    pub fn new(config: SchemaExampleGeneratorConfig) -> Self {
        let rng = match config.strategy {
            GenerationStrategy::Static => None,
            GenerationStrategy::Seeded {
                seed,
            } => Some(Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))),
        };
        Self {
            config,
            rng,
        }
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &SchemaExampleGeneratorConfig {
        &self.config
    }

    /// Generates a value for the schema without going through the async seam.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the schema cannot be synthesized.
    pub fn generate_value(&self, schema: &Value, media_type: &str) -> Result<Value, GenerationError> {
        synthesize(&self.config, self.rng.as_deref(), schema, media_type, &AtomicBool::new(false))
    }
}

impl Default for SchemaExampleGenerator {
    fn default() -> Self {
        Self::new(SchemaExampleGeneratorConfig::default())
    }
}

#[async_trait]
impl ExampleGenerator for SchemaExampleGenerator {
    async fn generate(&self, schema: &Value, media_type: &str) -> Result<Value, GenerationError> {
        let Ok(runtime) = Handle::try_current() else {
            return self.generate_value(schema, media_type);
        };
        let guard = CancelGuard::default();
        let cancel = Arc::clone(&guard.cancel);
        let config = self.config;
        let rng = self.rng.clone();
        let schema = schema.clone();
        let media_type = media_type.to_string();
        runtime
            .spawn_blocking(move || {
                synthesize(&config, rng.as_deref(), &schema, &media_type, &cancel)
            })
            .await
            .map_err(|err| GenerationError::Generator(format!("generation join failed: {err}")))?
    }
}

/// Raises the cancel flag when the owning future completes or is dropped.
#[derive(Default)]
struct CancelGuard {
    /// Flag polled by the walker.
    cancel: Arc<AtomicBool>,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// Runs one generation call.
fn synthesize(
    config: &SchemaExampleGeneratorConfig,
    rng: Option<&Mutex<StdRng>>,
    schema: &Value,
    media_type: &str,
    cancel: &AtomicBool,
) -> Result<Value, GenerationError> {
    let mut walker = Walker {
        rng: rng.map(|rng| rng.lock().unwrap_or_else(PoisonError::into_inner)),
        max_depth: config.max_depth,
        max_nodes: config.max_nodes,
        nodes: 0,
        cancel,
    };
    let value = walker.walk(schema, 0)?;
    if is_text(media_type) && !value.is_string() {
        let text =
            serde_json::to_string(&value).map_err(|err| GenerationError::Generator(err.to_string()))?;
        return Ok(Value::String(text));
    }
    Ok(value)
}

// ============================================================================
// SECTION: Schema Walker
// ============================================================================

/// Per-call traversal state.
struct Walker<'a> {
    /// Locked random source, absent for the static strategy.
    rng: Option<MutexGuard<'a, StdRng>>,
    /// Maximum nesting depth.
    max_depth: usize,
    /// Maximum number of values for the whole call.
    max_nodes: usize,
    /// Values visited so far.
    nodes: usize,
    /// Set once the caller stopped waiting.
    cancel: &'a AtomicBool,
}

impl Walker<'_> {
    /// Generates a value for a schema at the given depth.
    fn walk(&mut self, schema: &Value, depth: usize) -> Result<Value, GenerationError> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(GenerationError::Generator("generation cancelled".to_string()));
        }
        if depth > self.max_depth {
            return Err(GenerationError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            return Err(GenerationError::Unsupported(format!(
                "schema expands past {} generated values",
                self.max_nodes
            )));
        }
        let map = match schema {
            Value::Object(map) => map,
            Value::Bool(true) => return Ok(Value::Object(Map::new())),
            Value::Bool(false) => {
                return Err(GenerationError::Unsupported("schema `false` admits no value".to_string()));
            }
            _ => {
                return Err(GenerationError::Unsupported(
                    "schema must be an object or a boolean".to_string(),
                ));
            }
        };
        if let Some(reference) = map.get("$ref") {
            return Err(GenerationError::Unsupported(format!("$ref {reference} is not resolved")));
        }
        if let Some(hint) = self.literal_hint(map) {
            return Ok(hint);
        }
        if let Some(Value::Array(branches)) = map.get("allOf")
            && !branches.is_empty()
        {
            return self.all_of(map, branches, depth);
        }
        for keyword in ["oneOf", "anyOf"] {
            if let Some(Value::Array(branches)) = map.get(keyword)
                && !branches.is_empty()
            {
                let branch = &branches[self.pick(branches.len())];
                return self.walk(branch, depth + 1);
            }
        }

        match schema_type(map) {
            Some("object") => self.object(map, depth),
            Some("array") => self.array(map, depth),
            Some("string") => Ok(self.string(map)),
            Some("integer") => self.integer(map),
            Some("number") => self.number(map),
            Some("boolean") => Ok(Value::Bool(self.rng.as_mut().is_none_or(|rng| rng.r#gen()))),
            Some("null") => Ok(Value::Null),
            Some(other) => Err(GenerationError::Unsupported(format!("type {other}"))),
            None => Ok(Value::Object(Map::new())),
        }
    }

    /// Returns a literal value declared by the schema.
    fn literal_hint(&mut self, map: &Map<String, Value>) -> Option<Value> {
        if let Some(value) = map.get("const") {
            return Some(value.clone());
        }
        if let Some(Value::Array(examples)) = map.get("examples")
            && let Some(first) = examples.first()
        {
            return Some(first.clone());
        }
        if let Some(value) = map.get("example").or_else(|| map.get("default")) {
            return Some(value.clone());
        }
        if let Some(Value::Array(options)) = map.get("enum")
            && !options.is_empty()
        {
            return Some(options[self.pick(options.len())].clone());
        }
        None
    }

    /// Merges the generated members of every `allOf` branch.
    fn all_of(
        &mut self,
        map: &Map<String, Value>,
        branches: &[Value],
        depth: usize,
    ) -> Result<Value, GenerationError> {
        let mut merged = Map::new();
        let mut scalar = None;
        for branch in branches {
            match self.walk(branch, depth + 1)? {
                Value::Object(members) => merged.extend(members),
                other => scalar = Some(other),
            }
        }
        if let Some(Value::Object(properties)) = map.get("properties") {
            for (name, property) in properties {
                merged.insert(name.clone(), self.walk(property, depth + 1)?);
            }
        }
        match scalar {
            Some(value) if merged.is_empty() => Ok(value),
            _ => Ok(Value::Object(merged)),
        }
    }

    /// Generates every declared property.
    fn object(&mut self, map: &Map<String, Value>, depth: usize) -> Result<Value, GenerationError> {
        let mut object = Map::new();
        if let Some(Value::Object(properties)) = map.get("properties") {
            for (name, property) in properties {
                object.insert(name.clone(), self.walk(property, depth + 1)?);
            }
        }
        Ok(Value::Object(object))
    }

    /// Generates an array honoring `minItems` and `maxItems`.
    fn array(&mut self, map: &Map<String, Value>, depth: usize) -> Result<Value, GenerationError> {
        let min_items = read_usize(map, "minItems").unwrap_or(0);
        let max_items = read_usize(map, "maxItems").unwrap_or(usize::MAX);
        let mut count = min_items.max(1).min(max_items);
        if let Some(rng) = self.rng.as_mut() {
            count = count.saturating_add(rng.gen_range(0 ..= MAX_EXTRA_ITEMS)).min(max_items);
        }
        if count > MAX_ARRAY_ITEMS {
            return Err(GenerationError::Unsupported(format!("array of {count} items is too large")));
        }

        let tuple = map
            .get("prefixItems")
            .or_else(|| map.get("items").filter(|items| items.is_array()))
            .and_then(Value::as_array);
        let items = map.get("items").filter(|items| !items.is_array());
        let fallback = Value::Bool(true);
        let mut values = Vec::with_capacity(count);
        for index in 0 .. count {
            let item_schema = tuple
                .and_then(|tuple| tuple.get(index))
                .or(items)
                .unwrap_or(&fallback);
            values.push(self.walk(item_schema, depth + 1)?);
        }
        Ok(Value::Array(values))
    }

    /// Generates a string, using a fixed sample for known formats.
    fn string(&mut self, map: &Map<String, Value>) -> Value {
        if let Some(sample) = map.get("format").and_then(Value::as_str).and_then(format_sample) {
            return Value::String(sample.to_string());
        }
        let max_length = read_usize(map, "maxLength").unwrap_or(MAX_STRING_LENGTH).min(MAX_STRING_LENGTH);
        let length = read_usize(map, "minLength").map_or(SAMPLE_STRING.len(), |min| min.min(MAX_STRING_LENGTH));
        let length = length.min(max_length);
        let text = match self.rng.as_mut() {
            Some(rng) => (0 .. length).map(|_| char::from(rng.gen_range(b'a' ..= b'z'))).collect(),
            None => SAMPLE_STRING.chars().chain(std::iter::repeat('x')).take(length).collect(),
        };
        Value::String(text)
    }

    /// Generates an integer inside the declared bounds.
    fn integer(&mut self, map: &Map<String, Value>) -> Result<Value, GenerationError> {
        let (low, high) = integer_bounds(map)?;
        if let (Some(low), Some(high)) = (low, high)
            && low > high
        {
            return Err(GenerationError::Unsupported("integer bounds admit no value".to_string()));
        }
        let value = match (self.rng.as_mut(), low, high) {
            (Some(rng), Some(low), Some(high)) => rng.gen_range(low ..= high),
            _ => 0.max(low.unwrap_or(i64::MIN)).min(high.unwrap_or(i64::MAX)),
        };
        Ok(Value::from(value))
    }

    /// Generates a number inside the declared bounds.
    fn number(&mut self, map: &Map<String, Value>) -> Result<Value, GenerationError> {
        let low = read_bound(map, "minimum", "exclusiveMinimum", true);
        let high = read_bound(map, "maximum", "exclusiveMaximum", false);
        let admits = |value: f64| {
            low.is_none_or(|bound| bound.admits_above(value))
                && high.is_none_or(|bound| bound.admits_below(value))
        };

        if let (Some(rng), Some(low), Some(high)) = (self.rng.as_mut(), low, high)
            && low.value < high.value
            && (high.value - low.value).is_finite()
        {
            let drawn = rng.gen_range(low.value .. high.value);
            if admits(drawn) {
                return number_value(drawn);
            }
        }

        let mut candidates = vec![0.0];
        if let Some(low) = low {
            candidates.extend([low.value, low.value + 1.0]);
        }
        if let Some(high) = high {
            candidates.extend([high.value, high.value - 1.0]);
        }
        if let (Some(low), Some(high)) = (low, high) {
            candidates.push(low.value / 2.0 + high.value / 2.0);
        }
        candidates
            .into_iter()
            .find(|candidate| admits(*candidate))
            .map_or_else(
                || Err(GenerationError::Unsupported("number bounds admit no value".to_string())),
                number_value,
            )
    }

    /// Picks an index below `len`; the static strategy always picks zero.
    fn pick(&mut self, len: usize) -> usize {
        match self.rng.as_mut() {
            Some(rng) if len > 1 => rng.gen_range(0 .. len),
            _ => 0,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// One side of a numeric range.
#[derive(Debug, Clone, Copy)]
struct Bound {
    /// Bound value.
    value: f64,
    /// Whether the bound itself is excluded.
    exclusive: bool,
}

impl Bound {
    /// Returns true when `value` satisfies this bound as a lower bound.
    fn admits_above(self, value: f64) -> bool {
        if self.exclusive { value > self.value } else { value >= self.value }
    }

    /// Returns true when `value` satisfies this bound as an upper bound.
    fn admits_below(self, value: f64) -> bool {
        if self.exclusive { value < self.value } else { value <= self.value }
    }
}

/// Reads an inclusive keyword and its exclusive counterpart.
///
/// Accepts both the boolean form (`exclusiveMinimum: true` next to
/// `minimum`) and the numeric form, keeping the stricter of the two.
fn read_bound(map: &Map<String, Value>, inclusive: &str, exclusive: &str, lower: bool) -> Option<Bound> {
    let flagged = map.get(exclusive).and_then(Value::as_bool) == Some(true);
    let inclusive = map.get(inclusive).and_then(Value::as_f64).map(|value| Bound {
        value,
        exclusive: flagged,
    });
    let exclusive = map.get(exclusive).and_then(Value::as_f64).map(|value| Bound {
        value,
        exclusive: true,
    });
    match (inclusive, exclusive) {
        (Some(inclusive), Some(exclusive)) => {
            let stricter = if lower {
                exclusive.value >= inclusive.value
            } else {
                exclusive.value <= inclusive.value
            };
            Some(if stricter { exclusive } else { inclusive })
        }
        (bound, None) | (None, bound) => bound,
    }
}

/// Reads the inclusive integer range implied by the bound keywords.
fn integer_bounds(map: &Map<String, Value>) -> Result<(Option<i64>, Option<i64>), GenerationError> {
    let low = read_bound(map, "minimum", "exclusiveMinimum", true)
        .map(|bound| {
            let value = if bound.exclusive { bound.value.floor() + 1.0 } else { bound.value.ceil() };
            integer_bound(value, true)
        })
        .transpose()?;
    let high = read_bound(map, "maximum", "exclusiveMaximum", false)
        .map(|bound| {
            let value = if bound.exclusive { bound.value.ceil() - 1.0 } else { bound.value.floor() };
            integer_bound(value, false)
        })
        .transpose()?;
    Ok((low, high))
}

/// Converts an integral bound into an `i64`.
///
/// A bound every `i64` already satisfies saturates to the `i64` extreme; a
/// bound no `i64` can satisfy fails.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Input is integral and range-checked before the cast."
)]
fn integer_bound(value: f64, lower: bool) -> Result<i64, GenerationError> {
    let unrepresentable =
        || GenerationError::Unsupported(format!("integer bound {value} is outside the i64 range"));
    if !value.is_finite() {
        return Err(unrepresentable());
    }
    if value < -I64_LIMIT {
        return if lower { Ok(i64::MIN) } else { Err(unrepresentable()) };
    }
    if value >= I64_LIMIT {
        return if lower { Err(unrepresentable()) } else { Ok(i64::MAX) };
    }
    Ok(value as i64)
}

/// Wraps a float as a JSON number.
fn number_value(value: f64) -> Result<Value, GenerationError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| GenerationError::Unsupported("number is not finite".to_string()))
}

/// Reads a non-negative integer keyword.
fn read_usize(map: &Map<String, Value>, keyword: &str) -> Option<usize> {
    map.get(keyword).and_then(Value::as_u64).map(|value| usize::try_from(value).unwrap_or(usize::MAX))
}

/// Resolves the schema type, inferring it from structure when undeclared.
fn schema_type(map: &Map<String, Value>) -> Option<&str> {
    match map.get("type") {
        Some(Value::String(kind)) => Some(kind.as_str()),
        Some(Value::Array(kinds)) => {
            let mut names = kinds.iter().filter_map(Value::as_str);
            let first = names.clone().next();
            names.find(|kind| *kind != "null").or(first)
        }
        _ if map.contains_key("properties") => Some("object"),
        _ if map.contains_key("items") || map.contains_key("prefixItems") => Some("array"),
        _ => None,
    }
}

/// Returns a well-formed sample for a known string format.
fn format_sample(format: &str) -> Option<&'static str> {
    match format {
        "date-time" => Some("2024-01-01T00:00:00Z"),
        "date" => Some("2024-01-01"),
        "time" => Some("00:00:00Z"),
        "email" => Some("user@example.com"),
        "uuid" => Some("00000000-0000-4000-8000-000000000000"),
        "uri" | "url" => Some("https://example.com/"),
        "hostname" => Some("example.com"),
        "ipv4" => Some("192.0.2.1"),
        "ipv6" => Some("2001:db8::1"),
        _ => None,
    }
}
