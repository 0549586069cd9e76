use std::sync::atomic::{AtomicU64, Ordering};

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(String),

    #[error("Filter needs at least one non-empty token")]
    NoTokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Include,
    Exclude,
}

#[derive(Debug, Default)]
pub struct FilterStats {
    pub lines_scanned: AtomicU64,
    pub lines_matched: AtomicU64,
    pub bytes_processed: AtomicU64,
}

/// Substring gate over raw log bytes.
///
/// Tokens are matched literally; any one of them matching counts as a hit.
pub struct FilterEngine {
    matcher: RegexMatcher,
    mode: FilterMode,
    stats: FilterStats,
}

impl FilterEngine {
    pub fn literals<S: AsRef<str>>(
        tokens: &[S],
        case_sensitive: bool,
        mode: FilterMode,
    ) -> Result<Self, FilterError> {
        let tokens: Vec<&str> = tokens
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(FilterError::NoTokens);
        }

        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(!case_sensitive)
            .multi_line(false)
            .build_literals(&tokens[..])
            .map_err(|e| FilterError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            matcher,
            mode,
            stats: FilterStats::default(),
        })
    }

    #[inline]
    pub fn should_include(&self, line: &[u8]) -> bool {
        self.stats.lines_scanned.fetch_add(1, Ordering::Relaxed);
        self.stats.bytes_processed.fetch_add(line.len() as u64, Ordering::Relaxed);

        let matches = self.matcher.is_match(line).unwrap_or(false);

        let include = match self.mode {
            FilterMode::Include => matches,
            FilterMode::Exclude => !matches,
        };

        if include {
            self.stats.lines_matched.fetch_add(1, Ordering::Relaxed);
        }

        include
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn stats(&self) -> (u64, u64, u64) {
        (
            self.stats.lines_scanned.load(Ordering::Relaxed),
            self.stats.lines_matched.load(Ordering::Relaxed),
            self.stats.bytes_processed.load(Ordering::Relaxed),
        )
    }
}
