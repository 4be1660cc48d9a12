// crates/mock-responder-core/src/core/options.rs
// ============================================================================
// Module: Mock Options
// Description: Per-call overrides steering response negotiation.
// Purpose: Normalize the boolean-or-object mock setting into plain options.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Callers may pass `mock: true`, `mock: false`, or an options object. The
//! boolean form is a legacy enable toggle and resolves to empty options; the
//! resolution happens once per call in [`MockConfig::effective_options`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Overrides steering negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockOptions {
    /// Preferred response media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Preferred status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Example key to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_key: Option<String>,
    /// Forces schema generation even when examples exist.
    #[serde(default)]
    pub dynamic: bool,
}

/// Mock setting as supplied by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MockSetting {
    /// Legacy enable/disable toggle; carries no options.
    Toggle(bool),
    /// Explicit options.
    Options(MockOptions),
}

impl Default for MockSetting {
    fn default() -> Self {
        Self::Options(MockOptions::default())
    }
}

impl MockSetting {
    /// Resolves the setting into a fresh options value.
    #[must_use]
    pub fn resolve(&self) -> MockOptions {
        match self {
            Self::Toggle(_) => MockOptions::default(),
            Self::Options(options) => options.clone(),
        }
    }
}

/// Per-call mock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Mock setting; defaults to empty options when absent or null.
    #[serde(default, deserialize_with = "deserialize_setting")]
    pub mock: MockSetting,
}

impl MockConfig {
    /// Creates a configuration from explicit options.
    #[must_use]
    pub const fn with_options(options: MockOptions) -> Self {
        Self {
            mock: MockSetting::Options(options),
        }
    }

    /// Returns the effective options for a call.
    ///
    /// An absent configuration behaves like empty options. When no media type
    /// is configured, `request_media_type` (the request's own `Content-type`)
    /// becomes the preference.
    #[must_use]
    pub fn effective_options(config: Option<&Self>, request_media_type: Option<&str>) -> MockOptions {
        let mut options = config.map_or_else(MockOptions::default, |config| config.mock.resolve());
        if options.media_type.as_deref().is_none_or(str::is_empty)
            && let Some(media_type) = request_media_type.filter(|value| !value.is_empty())
        {
            options.media_type = Some(media_type.to_string());
        }
        options
    }
}

/// Reads a mock setting, treating `null` like an absent one.
fn deserialize_setting<'de, D>(deserializer: D) -> Result<MockSetting, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<MockSetting>::deserialize(deserializer).map(Option::unwrap_or_default)
}
