//! Target identifiers: parsing user input into fetchable URLs.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Prefix used to turn a bare video code into a watch URL.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Label used when no id fragment can be derived from a URL.
pub const UNKNOWN_ID: &str = "unknown id";

fn absolute_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://").expect("Invalid regex"))
}

/// Split raw input into target identifiers.
///
/// In list mode every non-blank line is one identifier (trimmed). Otherwise
/// the whole trimmed input is a single identifier. Empty input yields
/// nothing.
pub fn parse_targets(input: &str, list_mode: bool) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if list_mode {
        trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        vec![trimmed.to_string()]
    }
}

/// Turn an identifier into a URL.
///
/// Anything already starting with `http://` or `https://` is returned as is;
/// everything else is treated as a bare video code.
pub fn normalize(identifier: &str) -> String {
    if absolute_url_regex().is_match(identifier) {
        identifier.to_string()
    } else {
        format!("{}{}", WATCH_URL_PREFIX, identifier)
    }
}

/// Short label identifying a URL in result lines.
///
/// Text after the last `=` when present, otherwise the last non-empty path
/// segment, otherwise [`UNKNOWN_ID`].
pub fn id_fragment(url: &str) -> String {
    if let Some((_, rest)) = url.rsplit_once('=') {
        return rest.to_string();
    }

    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_ID.to_string())
}
