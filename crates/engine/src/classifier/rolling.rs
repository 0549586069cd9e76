//! Rolling — per-bucket sets of returning identifiers.

use std::collections::HashSet;

/// Returning identifiers seen so far in the open day, month and year.
///
/// Each set is cleared on its own boundary; a year change clears all three
/// because it also crosses a month and a day boundary.
#[derive(Debug, Default)]
pub struct RollingSets {
    pub(crate) day: HashSet<String>,
    pub(crate) month: HashSet<String>,
    pub(crate) year: HashSet<String>,
}

impl RollingSets {
    pub fn insert(&mut self, identifier: &str) {
        if !self.day.contains(identifier) {
            self.day.insert(identifier.to_string());
        }
        if !self.month.contains(identifier) {
            self.month.insert(identifier.to_string());
        }
        if !self.year.contains(identifier) {
            self.year.insert(identifier.to_string());
        }
    }

    /// Size of the day set, then clear it.
    pub fn close_day(&mut self) -> u64 {
        Self::drain_len(&mut self.day)
    }

    pub fn close_month(&mut self) -> u64 {
        Self::drain_len(&mut self.month)
    }

    pub fn close_year(&mut self) -> u64 {
        Self::drain_len(&mut self.year)
    }

    pub fn day_len(&self) -> u64 {
        self.day.len() as u64
    }

    pub fn month_len(&self) -> u64 {
        self.month.len() as u64
    }

    pub fn year_len(&self) -> u64 {
        self.year.len() as u64
    }

    fn drain_len(set: &mut HashSet<String>) -> u64 {
        let len = set.len() as u64;
        set.clear();
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_counts_distinct() {
        let mut sets = RollingSets::default();
        sets.insert("a");
        sets.insert("a");
        sets.insert("b");
        assert_eq!(sets.day_len(), 2);
        assert_eq!(sets.month_len(), 2);
        assert_eq!(sets.year_len(), 2);
    }

    #[test]
    fn test_close_clears_only_that_level() {
        let mut sets = RollingSets::default();
        sets.insert("a");
        sets.insert("b");

        assert_eq!(sets.close_day(), 2);
        assert_eq!(sets.day_len(), 0);
        assert_eq!(sets.month_len(), 2);

        sets.insert("a");
        assert_eq!(sets.day_len(), 1);
        assert_eq!(sets.close_month(), 2);
        assert_eq!(sets.year_len(), 2);
        assert_eq!(sets.close_year(), 2);
        assert_eq!(sets.close_year(), 0);
    }
}
