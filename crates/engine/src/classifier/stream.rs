//! Stream — single-pass new/returning visitor classification.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use super::rolling::RollingSets;
use crate::error::{EngineError, QueryError, StoreError};
use crate::record::VisitRecord;
use crate::store::{BucketDate, BucketKey, TreeSnapshot, VisitorCount, VisitorTree};

/// Outcome of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First time this identifier appears in the run.
    New,
    /// Identifier was already known before this record.
    Returning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifierStats {
    pub records: u64,
    pub new_visitors: u64,
    pub returning_visits: u64,
    /// Records dated before their predecessor. They are still classified,
    /// but the old-counts of the buckets involved are unreliable.
    pub out_of_order: u64,
}

/// Streaming visitor classifier.
///
/// Records must arrive in non-decreasing date order across all inputs.
/// When a record's day, month or year differs from the previous record's,
/// the outgoing bucket is closed: its `old` counter is set to the number
/// of distinct returning identifiers it saw, and that rolling set is
/// discarded. Only the set of identifiers ever seen lives for the whole run.
///
/// Buckets that are still open when input ends keep `old == 0` until
/// [`VisitorClassifier::flush`] is called.
#[derive(Debug, Default)]
pub struct VisitorClassifier {
    tree: VisitorTree,
    seen: HashSet<String>,
    rolling: RollingSets,
    last: Option<BucketDate>,
    stats: ClassifierStats,
}

impl VisitorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &VisitRecord) -> Result<Visit, EngineError> {
        self.observe_at(record.bucket(), &record.identifier)
    }

    pub fn observe_at(&mut self, date: BucketDate, identifier: &str) -> Result<Visit, EngineError> {
        if identifier.is_empty() {
            return Err(EngineError::EmptyIdentifier);
        }

        if let Some(last) = self.last {
            if date < last {
                self.stats.out_of_order += 1;
                warn!(
                    "Record dated {} follows {}; input is not time-ordered",
                    date, last
                );
            }
        }

        self.close_changed(date)?;
        self.tree.ensure_day(date);

        let visit = if self.seen.contains(identifier) {
            self.rolling.insert(identifier);
            self.stats.returning_visits += 1;
            Visit::Returning
        } else {
            self.tree.increment_new(date)?;
            self.seen.insert(identifier.to_string());
            self.stats.new_visitors += 1;
            Visit::New
        };

        self.stats.records += 1;
        self.last = Some(date);
        Ok(visit)
    }

    /// Close every level whose key differs between the previous record and `date`.
    fn close_changed(&mut self, date: BucketDate) -> Result<(), StoreError> {
        let Some(last) = self.last else {
            return Ok(());
        };

        if last.year != date.year {
            let count = self.rolling.close_year();
            self.tree.set_old_year(last.year, count)?;
            debug!(year = last.year, old = count, "Closed year bucket");
        }

        if !last.same_month(&date) {
            let count = self.rolling.close_month();
            self.tree.set_old_month(last.year, last.month, count)?;
            debug!(year = last.year, month = last.month, old = count, "Closed month bucket");
        }

        if last != date {
            let count = self.rolling.close_day();
            self.tree.set_old_day(last, count)?;
            debug!(day = %last, old = count, "Closed day bucket");
        }

        Ok(())
    }

    /// Write the old-counts of the currently open day, month and year.
    ///
    /// The rolling sets are kept, so calling this more than once is harmless
    /// and further records for the same bucket still count correctly; the
    /// eventual boundary close overwrites the value written here.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let Some(last) = self.last else {
            return Ok(());
        };

        self.tree.set_old_year(last.year, self.rolling.year_len())?;
        self.tree
            .set_old_month(last.year, last.month, self.rolling.month_len())?;
        self.tree.set_old_day(last, self.rolling.day_len())?;
        debug!(day = %last, "Flushed open buckets");
        Ok(())
    }

    /// Flush and hand back the finished tree.
    pub fn finish(mut self) -> Result<VisitorTree, StoreError> {
        self.flush()?;
        Ok(self.tree)
    }

    // --- Read side ---

    pub fn tree(&self) -> &VisitorTree {
        &self.tree
    }

    pub fn query(&self, key: BucketKey) -> VisitorCount {
        self.tree.query(key)
    }

    /// Look up a bucket by `DD/MM/YYYY`, `MM/YYYY` or `YYYY`.
    pub fn visitors_from(&self, date: &str) -> Result<VisitorCount, QueryError> {
        let key: BucketKey = date.parse()?;
        Ok(self.tree.query(key))
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        self.tree.snapshot()
    }

    pub fn stats(&self) -> ClassifierStats {
        self.stats
    }

    pub fn last_seen(&self) -> Option<BucketDate> {
        self.last
    }

    pub fn distinct_visitors(&self) -> usize {
        self.seen.len()
    }
}
