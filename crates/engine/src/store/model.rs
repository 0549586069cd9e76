//! Model — counters, tree nodes and bucket addressing.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;
use serde::Serialize;

/// New / returning visitor pair held by every node of the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisitorCount {
    pub new: u64,
    pub old: u64,
}

impl VisitorCount {
    pub fn new(new: u64, old: u64) -> Self {
        Self { new, old }
    }

    pub fn is_zero(&self) -> bool {
        self.new == 0 && self.old == 0
    }
}

impl fmt::Display for VisitorCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new={} old={}", self.new, self.old)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DayNode {
    pub visitors: VisitorCount,
}

#[derive(Debug, Clone, Default)]
pub struct MonthNode {
    pub visitors: VisitorCount,
    pub days: BTreeMap<u32, DayNode>,
}

#[derive(Debug, Clone, Default)]
pub struct YearNode {
    pub visitors: VisitorCount,
    pub months: BTreeMap<u32, MonthNode>,
}

/// Calendar position of a record, reduced to the three bucket keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BucketDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn from_datelike<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn same_month(&self, other: &BucketDate) -> bool {
        self.year == other.year && self.month == other.month
    }
}

impl fmt::Display for BucketDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Address of a single bucket at year, month or day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    Year(i32),
    Month(i32, u32),
    Day(i32, u32, u32),
}

impl From<BucketDate> for BucketKey {
    fn from(date: BucketDate) -> Self {
        BucketKey::Day(date.year, date.month, date.day)
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Year(y) => write!(f, "{}", y),
            BucketKey::Month(y, m) => write!(f, "{}/{}", y, m),
            BucketKey::Day(y, m, d) => write!(f, "{}/{}/{}", y, m, d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bucket_date_from_chrono() {
        let date = NaiveDate::from_ymd_opt(2022, 4, 20).unwrap();
        let bucket = BucketDate::from_datelike(&date);
        assert_eq!(bucket, BucketDate::new(2022, 4, 20));
        assert_eq!(bucket.to_string(), "2022-04-20");
    }

    #[test]
    fn test_bucket_date_ordering() {
        assert!(BucketDate::new(2021, 12, 31) < BucketDate::new(2022, 1, 1));
        assert!(BucketDate::new(2022, 4, 20) < BucketDate::new(2022, 4, 21));
        assert!(BucketDate::new(2022, 4, 30) < BucketDate::new(2022, 5, 1));
    }

    #[test]
    fn test_same_month() {
        let a = BucketDate::new(2022, 4, 1);
        assert!(a.same_month(&BucketDate::new(2022, 4, 30)));
        assert!(!a.same_month(&BucketDate::new(2023, 4, 1)));
    }

    #[test]
    fn test_bucket_key_display() {
        assert_eq!(BucketKey::Year(2022).to_string(), "2022");
        assert_eq!(BucketKey::Month(2022, 4).to_string(), "2022/4");
        assert_eq!(BucketKey::Day(2022, 4, 20).to_string(), "2022/4/20");
    }

    #[test]
    fn test_visitor_count_default_is_zero() {
        assert!(VisitorCount::default().is_zero());
        assert_eq!(VisitorCount::new(2, 1).to_string(), "new=2 old=1");
    }
}
