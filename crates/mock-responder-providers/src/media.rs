// crates/mock-responder-providers/src/media.rs
// ============================================================================
// Module: Media Range Matching
// Description: Media type normalization and content selection.
// Purpose: Pick the declared content that best serves a preferred media type.
// Dependencies: mock-responder-core
// ============================================================================

//! ## Overview
//! Media types are compared by essence: parameters are dropped and the
//! `type/subtype` pair is lowercased. A preferred range selects the most
//! specific declared content; ties resolve to declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mock_responder_core::MediaContent;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Media type preferred when the caller states no preference.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Wildcard matching any media type.
const ANY_MEDIA_TYPE: &str = "*/*";

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Returns the lowercased `type/subtype` of a media type without parameters.
#[must_use]
pub fn essence(media_type: &str) -> String {
    media_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Returns true when the media type belongs to the `text/*` family.
#[must_use]
pub fn is_text(media_type: &str) -> bool {
    essence(media_type).starts_with("text/")
}

/// Selects the declared content best matching the preferred media range.
///
/// Exact essence matches win over `type/*` matches, which win over `*/*`.
/// Wildcards may appear on either side.
#[must_use]
pub fn select_content<'a>(contents: &'a [MediaContent], preferred: &str) -> Option<&'a MediaContent> {
    let preferred = essence(preferred);
    let mut best: Option<(u8, &MediaContent)> = None;
    for content in contents {
        let Some(score) = match_score(&preferred, &essence(&content.media_type)) else {
            continue;
        };
        if best.is_none_or(|(current, _)| score > current) {
            best = Some((score, content));
        }
    }
    best.map(|(_, content)| content)
}

/// Selects the JSON content when declared, otherwise the first content.
#[must_use]
pub fn default_content(contents: &[MediaContent]) -> Option<&MediaContent> {
    contents
        .iter()
        .find(|content| essence(&content.media_type) == JSON_MEDIA_TYPE)
        .or_else(|| contents.first())
}

/// Scores how specifically two media essences match.
fn match_score(left: &str, right: &str) -> Option<u8> {
    if left == right {
        return Some(3);
    }
    if left == ANY_MEDIA_TYPE || right == ANY_MEDIA_TYPE {
        return Some(1);
    }
    let (left_type, left_subtype) = left.split_once('/')?;
    let (right_type, right_subtype) = right.split_once('/')?;
    let wildcard = left_subtype == "*" || right_subtype == "*";
    (wildcard && left_type == right_type).then_some(2)
}
