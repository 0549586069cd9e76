//! Caller-side gates applied before a line reaches the classifier.
//!
//! The crawler gate excludes raw lines mentioning a known bot; the optional
//! path gate keeps only requests to a given endpoint.

pub mod engine;

pub use engine::{FilterEngine, FilterError, FilterMode, FilterStats};

pub const DEFAULT_CRAWLERS: &[&str] = &[
    "YandexBot",
    "SoftDev",
    "UptimeRobot",
    "Nessus",
    "GoogleBot",
];

/// Exclude filter over the configured crawler tokens, or `None` if the list is empty.
pub fn crawler_gate<S: AsRef<str>>(
    crawlers: &[S],
    case_sensitive: bool,
) -> Result<Option<FilterEngine>, FilterError> {
    if crawlers.is_empty() {
        return Ok(None);
    }
    FilterEngine::literals(crawlers, case_sensitive, FilterMode::Exclude).map(Some)
}

/// Include filter matching request paths that contain `fragment`.
pub fn path_gate(fragment: Option<&str>) -> Result<Option<FilterEngine>, FilterError> {
    match fragment {
        Some(f) => FilterEngine::literals(&[f], true, FilterMode::Include).map(Some),
        None => Ok(None),
    }
}
