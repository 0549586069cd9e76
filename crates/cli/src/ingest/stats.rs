use serde::Serialize;

/// Per-run line counters. Every line read lands in exactly one of
/// `blank`, `crawlers`, `malformed`, `filtered` or `records`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub sources: u64,
    pub lines: u64,
    pub blank: u64,
    pub crawlers: u64,
    pub malformed: u64,
    pub filtered: u64,
    pub records: u64,
}

impl IngestStats {
    pub fn skipped(&self) -> u64 {
        self.blank + self.crawlers + self.malformed + self.filtered
    }

    /// Share of non-blank lines that parsed (1.0 when nothing was read).
    pub fn parse_rate(&self) -> f64 {
        let attempted = self.lines - self.blank - self.crawlers;
        if attempted == 0 {
            1.0
        } else {
            (attempted - self.malformed) as f64 / attempted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = IngestStats::default();
        assert_eq!(stats.skipped(), 0);
        assert_eq!(stats.parse_rate(), 1.0);
    }

    #[test]
    fn test_parse_rate_ignores_blank_and_crawlers() {
        let stats = IngestStats {
            sources: 1,
            lines: 10,
            blank: 2,
            crawlers: 4,
            malformed: 1,
            filtered: 0,
            records: 3,
        };
        assert_eq!(stats.skipped(), 7);
        assert_eq!(stats.skipped() + stats.records, stats.lines);
        assert_eq!(stats.parse_rate(), 0.75);
    }
}
