//! Tree — the year → month → day counter hierarchy.
//!
//! Nodes are created on demand through the `ensure_*` calls and never
//! removed. Every parent owns its children outright; the maps are
//! `BTreeMap`s so key iteration is always ascending.

use std::collections::BTreeMap;

use super::model::{BucketDate, BucketKey, DayNode, MonthNode, VisitorCount, YearNode};
use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub struct VisitorTree {
    pub(crate) visitors: VisitorCount,
    pub(crate) years: BTreeMap<i32, YearNode>,
}

impl VisitorTree {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Creation ---

    pub fn ensure_year(&mut self, year: i32) -> &mut YearNode {
        self.years.entry(year).or_default()
    }

    /// Creates the month (and its year, if missing).
    pub fn ensure_month(&mut self, year: i32, month: u32) -> &mut MonthNode {
        self.ensure_year(year).months.entry(month).or_default()
    }

    /// Creates the day (and its month and year, if missing).
    pub fn ensure_day(&mut self, date: BucketDate) -> &mut DayNode {
        self.ensure_month(date.year, date.month)
            .days
            .entry(date.day)
            .or_default()
    }

    // --- Mutation ---

    /// Count one first-time visitor on `date`, propagating up to the root.
    pub fn increment_new(&mut self, date: BucketDate) -> Result<(), StoreError> {
        let year = self
            .years
            .get_mut(&date.year)
            .ok_or(StoreError::MissingBucket(BucketKey::Year(date.year)))?;
        let month = year
            .months
            .get_mut(&date.month)
            .ok_or(StoreError::MissingBucket(BucketKey::Month(date.year, date.month)))?;
        let day = month
            .days
            .get_mut(&date.day)
            .ok_or(StoreError::MissingBucket(date.into()))?;

        day.visitors.new += 1;
        month.visitors.new += 1;
        year.visitors.new += 1;
        self.visitors.new += 1;
        Ok(())
    }

    pub fn set_old_day(&mut self, date: BucketDate, count: u64) -> Result<(), StoreError> {
        let day = self
            .years
            .get_mut(&date.year)
            .and_then(|y| y.months.get_mut(&date.month))
            .and_then(|m| m.days.get_mut(&date.day))
            .ok_or(StoreError::MissingBucket(date.into()))?;
        day.visitors.old = count;
        Ok(())
    }

    pub fn set_old_month(&mut self, year: i32, month: u32, count: u64) -> Result<(), StoreError> {
        let node = self
            .years
            .get_mut(&year)
            .and_then(|y| y.months.get_mut(&month))
            .ok_or(StoreError::MissingBucket(BucketKey::Month(year, month)))?;
        node.visitors.old = count;
        Ok(())
    }

    pub fn set_old_year(&mut self, year: i32, count: u64) -> Result<(), StoreError> {
        let node = self
            .years
            .get_mut(&year)
            .ok_or(StoreError::MissingBucket(BucketKey::Year(year)))?;
        node.visitors.old = count;
        Ok(())
    }

    // --- Queries ---

    /// Counts for a bucket. A bucket with no recorded traffic reads as zero.
    pub fn query(&self, key: BucketKey) -> VisitorCount {
        let found = match key {
            BucketKey::Year(y) => self.years.get(&y).map(|n| n.visitors),
            BucketKey::Month(y, m) => self
                .years
                .get(&y)
                .and_then(|n| n.months.get(&m))
                .map(|n| n.visitors),
            BucketKey::Day(y, m, d) => self
                .years
                .get(&y)
                .and_then(|n| n.months.get(&m))
                .and_then(|n| n.days.get(&d))
                .map(|n| n.visitors),
        };
        found.unwrap_or_default()
    }

    pub fn total(&self) -> VisitorCount {
        self.visitors
    }

    pub fn contains(&self, key: BucketKey) -> bool {
        match key {
            BucketKey::Year(y) => self.years.contains_key(&y),
            BucketKey::Month(y, m) => self
                .years
                .get(&y)
                .is_some_and(|n| n.months.contains_key(&m)),
            BucketKey::Day(y, m, d) => self
                .years
                .get(&y)
                .and_then(|n| n.months.get(&m))
                .is_some_and(|n| n.days.contains_key(&d)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    // --- Iteration ---

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// Years at or after `min_year`. Used to hide zero-date artifacts.
    pub fn years_since(&self, min_year: i32) -> impl Iterator<Item = i32> + '_ {
        self.years.range(min_year..).map(|(y, _)| *y)
    }

    pub fn months_of(&self, year: i32) -> impl Iterator<Item = u32> + '_ {
        self.years
            .get(&year)
            .into_iter()
            .flat_map(|n| n.months.keys().copied())
    }

    pub fn days_of(&self, year: i32, month: u32) -> impl Iterator<Item = u32> + '_ {
        self.years
            .get(&year)
            .and_then(|n| n.months.get(&month))
            .into_iter()
            .flat_map(|n| n.days.keys().copied())
    }
}
