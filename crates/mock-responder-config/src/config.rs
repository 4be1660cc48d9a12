// crates/mock-responder-config/src/config.rs
// ============================================================================
// Module: Mock Responder Configuration
// Description: Configuration loading and validation for the mock responder.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: mock-responder-core, mock-responder-providers, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults, so an empty file is a valid configuration.
//! Invalid values fail closed instead of being clamped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mock_responder_core::FileMockAuditSink;
use mock_responder_core::HttpMockerConfig;
use mock_responder_core::MockAuditSink;
use mock_responder_core::MockConfig;
use mock_responder_core::MockOptions;
use mock_responder_core::NoopMockAuditSink;
use mock_responder_core::StderrMockAuditSink;
use mock_responder_providers::DEFAULT_MAX_DEPTH;
use mock_responder_providers::DEFAULT_MAX_NODES;
use mock_responder_providers::GenerationStrategy;
use mock_responder_providers::SchemaExampleGeneratorConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "mock-responder.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "MOCK_RESPONDER_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Smallest accepted generation depth.
pub(crate) const MIN_MAX_DEPTH: usize = 1;
/// Largest accepted generation depth.
pub(crate) const MAX_MAX_DEPTH: usize = 64;
/// Largest accepted per-call generated value budget.
pub(crate) const MAX_MAX_NODES: usize = 10_000_000;
/// Largest accepted generation timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 60_000;
/// Maximum length of an example key.
pub(crate) const MAX_EXAMPLE_KEY_LENGTH: usize = 256;
/// Maximum length of a media type.
pub(crate) const MAX_MEDIA_TYPE_LENGTH: usize = 255;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Mock responder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockResponderConfig {
    /// Default mock options applied to every call.
    #[serde(default)]
    pub mock: MockSection,
    /// Example generation settings.
    #[serde(default)]
    pub generation: GenerationSection,
    /// Audit output settings.
    #[serde(default)]
    pub audit: AuditSection,
}

impl MockResponderConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mock.validate()?;
        self.generation.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the per-call mock configuration built from `[mock]`.
    #[must_use]
    pub fn mock_config(&self) -> MockConfig {
        MockConfig::with_options(self.mock.options())
    }

    /// Returns the mocker configuration built from `[generation]`.
    #[must_use]
    pub fn mocker_config(&self) -> HttpMockerConfig {
        HttpMockerConfig {
            generation_timeout: self.generation.timeout_ms.map(Duration::from_millis),
        }
    }

    /// Returns the generator configuration built from `[generation]`.
    #[must_use]
    pub fn generator_config(&self) -> SchemaExampleGeneratorConfig {
        self.generation.generator_config()
    }

    /// Opens the audit sink selected by `[audit]`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the audit file cannot be opened.
    pub fn audit_sink(&self) -> io::Result<Arc<dyn MockAuditSink>> {
        self.audit.open()
    }
}

// ============================================================================
// SECTION: Mock Options
// ============================================================================

/// Default mock options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockSection {
    /// Preferred response media type.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Preferred response status code.
    #[serde(default)]
    pub code: Option<String>,
    /// Preferred example key.
    #[serde(default)]
    pub example_key: Option<String>,
    /// Force schema-based generation.
    #[serde(default)]
    pub dynamic: bool,
}

impl MockSection {
    /// Validates default mock options.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(code) = &self.code
            && !is_status_code(code)
        {
            return Err(ConfigError::Invalid(format!(
                "mock.code must be a 3-digit status between 100 and 599, got '{code}'"
            )));
        }
        if let Some(media_type) = &self.media_type
            && !is_media_type(media_type)
        {
            return Err(ConfigError::Invalid(format!(
                "mock.media_type must look like type/subtype, got '{media_type}'"
            )));
        }
        if let Some(key) = &self.example_key {
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid("mock.example_key must be non-empty".to_string()));
            }
            if key.trim() != key.as_str() {
                return Err(ConfigError::Invalid(
                    "mock.example_key must not have surrounding whitespace".to_string(),
                ));
            }
            if key.len() > MAX_EXAMPLE_KEY_LENGTH {
                return Err(ConfigError::Invalid("mock.example_key exceeds max length".to_string()));
            }
        }
        Ok(())
    }

    /// Converts the section into per-call mock options.
    fn options(&self) -> MockOptions {
        MockOptions {
            media_type: self.media_type.clone(),
            code: self.code.clone(),
            example_key: self.example_key.clone(),
            dynamic: self.dynamic,
        }
    }
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Generation strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Deterministic first-choice generation.
    #[default]
    Static,
    /// Seeded random generation.
    Seeded,
}

/// Example generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSection {
    /// Choice strategy.
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Seed for the seeded strategy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Maximum schema nesting depth.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum number of values generated by one call.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    /// Optional generation timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Static,
            seed: None,
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            timeout_ms: None,
        }
    }
}

impl GenerationSection {
    /// Validates generation settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.strategy == StrategyKind::Seeded && self.seed.is_none() {
            return Err(ConfigError::Invalid(
                "generation.seed is required when strategy is seeded".to_string(),
            ));
        }
        if self.strategy == StrategyKind::Static && self.seed.is_some() {
            return Err(ConfigError::Invalid(
                "generation.seed is only valid when strategy is seeded".to_string(),
            ));
        }
        if !(MIN_MAX_DEPTH ..= MAX_MAX_DEPTH).contains(&self.max_depth) {
            return Err(ConfigError::Invalid(format!(
                "generation.max_depth must be between {MIN_MAX_DEPTH} and {MAX_MAX_DEPTH}"
            )));
        }
        if !(1 ..= MAX_MAX_NODES).contains(&self.max_nodes) {
            return Err(ConfigError::Invalid(format!(
                "generation.max_nodes must be between 1 and {MAX_MAX_NODES}"
            )));
        }
        if let Some(timeout_ms) = self.timeout_ms
            && !(1 ..= MAX_TIMEOUT_MS).contains(&timeout_ms)
        {
            return Err(ConfigError::Invalid(format!(
                "generation.timeout_ms must be between 1 and {MAX_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }

    /// Builds the generator configuration.
    fn generator_config(&self) -> SchemaExampleGeneratorConfig {
        let strategy = match (self.strategy, self.seed) {
            (StrategyKind::Seeded, Some(seed)) => GenerationStrategy::Seeded {
                seed,
            },
            _ => GenerationStrategy::Static,
        };
        SchemaExampleGeneratorConfig {
            strategy,
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Audit output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSection {
    /// Selected sink.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditSection {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required when sink is file".to_string()))
            }
            (_, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only valid when sink is file".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }

    /// Opens the configured sink.
    fn open(&self) -> io::Result<Arc<dyn MockAuditSink>> {
        Ok(match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::None, _) => Arc::new(NoopMockAuditSink),
            (AuditSinkKind::Stderr, _) => Arc::new(StderrMockAuditSink),
            (AuditSinkKind::File, Some(path)) => {
                Arc::new(FileMockAuditSink::new(Path::new(path.trim()))?)
            }
            (AuditSinkKind::File, None) => {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, "audit.path is not set"));
            }
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Returns true for three-digit codes between 100 and 599.
fn is_status_code(code: &str) -> bool {
    code.len() == 3
        && code.bytes().all(|byte| byte.is_ascii_digit())
        && code.parse::<u16>().is_ok_and(|status| (100 ..= 599).contains(&status))
}

/// Returns true for `type/subtype` media types, parameters allowed.
fn is_media_type(value: &str) -> bool {
    if value.len() > MAX_MEDIA_TYPE_LENGTH {
        return false;
    }
    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    is_token(kind) && is_token(subtype)
}

/// Returns true for non-empty media type tokens.
fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| {
            byte.is_ascii_alphanumeric()
                || matches!(byte, b'!' | b'#' | b'$' | b'&' | b'-' | b'^' | b'_' | b'.' | b'+' | b'*')
        })
}

/// Default generation depth.
const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Default per-call generated value budget.
const fn default_max_nodes() -> usize {
    DEFAULT_MAX_NODES
}

// ============================================================================
// SECTION: Tests
// ============================================================================
