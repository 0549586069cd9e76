//! Snapshot — owned, serializable dump of the whole tree.

use serde::Serialize;

use super::model::VisitorCount;
use super::tree::VisitorTree;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub total: VisitorCount,
    pub years: Vec<YearSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSnapshot {
    pub year: i32,
    #[serde(flatten)]
    pub visitors: VisitorCount,
    pub months: Vec<MonthSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSnapshot {
    pub month: u32,
    #[serde(flatten)]
    pub visitors: VisitorCount,
    pub days: Vec<DaySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySnapshot {
    pub day: u32,
    #[serde(flatten)]
    pub visitors: VisitorCount,
}

impl VisitorTree {
    /// Copy every node out of the tree in ascending key order.
    pub fn snapshot(&self) -> TreeSnapshot {
        let years = self
            .years
            .iter()
            .map(|(year, y)| YearSnapshot {
                year: *year,
                visitors: y.visitors,
                months: y
                    .months
                    .iter()
                    .map(|(month, m)| MonthSnapshot {
                        month: *month,
                        visitors: m.visitors,
                        days: m
                            .days
                            .iter()
                            .map(|(day, d)| DaySnapshot {
                                day: *day,
                                visitors: d.visitors,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        TreeSnapshot {
            total: self.visitors,
            years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::BucketDate;

    #[test]
    fn test_empty_snapshot() {
        let snap = VisitorTree::new().snapshot();
        assert_eq!(snap.total, VisitorCount::default());
        assert!(snap.years.is_empty());
    }

    #[test]
    fn test_snapshot_mirrors_tree() {
        let mut tree = VisitorTree::new();
        let d = BucketDate::new(2022, 4, 20);
        tree.ensure_day(d);
        tree.ensure_day(BucketDate::new(2022, 3, 1));
        tree.increment_new(d).unwrap();
        tree.set_old_month(2022, 4, 1).unwrap();

        let snap = tree.snapshot();
        assert_eq!(snap.total, VisitorCount::new(1, 0));
        assert_eq!(snap.years.len(), 1);
        let months: Vec<u32> = snap.years[0].months.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![3, 4]);
        assert_eq!(snap.years[0].months[1].visitors, VisitorCount::new(1, 1));
        assert_eq!(snap.years[0].months[1].days[0].day, 20);
    }

    #[test]
    fn test_snapshot_serializes_flat_counts() {
        let mut tree = VisitorTree::new();
        let d = BucketDate::new(2022, 4, 20);
        tree.ensure_day(d);
        tree.increment_new(d).unwrap();

        let json = serde_json::to_value(tree.snapshot()).unwrap();
        assert_eq!(json["total"]["new"], 1);
        assert_eq!(json["years"][0]["year"], 2022);
        assert_eq!(json["years"][0]["new"], 1);
        assert_eq!(json["years"][0]["months"][0]["days"][0]["day"], 20);
        assert_eq!(json["years"][0]["months"][0]["days"][0]["old"], 0);
    }
}
