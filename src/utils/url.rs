//! URL utilities for the video platform

use crate::error::TubeError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Origin that relative playlist links are resolved against
pub const BASE_ORIGIN: &str = "https://www.youtube.com";

static CANONICAL_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://www\.youtube\.com/").expect("valid regex"));

/// Check if URL matches the platform's canonical URL pattern
pub fn is_canonical_url(url: &str) -> bool {
    CANONICAL_URL.is_match(url)
}

/// Check if a source looks like a plain-text list of URLs
pub fn is_list_file(source: &str) -> bool {
    source.ends_with(".txt")
}

/// Extract the `v` query parameter from a watch URL
pub fn extract_video_id(url: &str) -> Result<String, TubeError> {
    let parsed = Url::parse(url)?;

    if let Some(path) = parsed.path().strip_prefix("/shorts/") {
        if path.is_empty() {
            return Err(TubeError::InvalidUrl(
                "Missing video ID in shorts path".to_string(),
            ));
        }
        return Ok(path.to_string());
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| TubeError::InvalidUrl(format!("Missing v parameter in {}", url)))
}

/// Resolve a scraped href to an absolute URL on the platform origin.
///
/// Relative links get the origin prefixed; links that are already absolute
/// are kept as they are instead of having the origin doubled.
pub fn normalize_link(href: &str) -> Option<String> {
    let base = Url::parse(BASE_ORIGIN).ok()?;
    base.join(href.trim()).ok().map(String::from)
}
