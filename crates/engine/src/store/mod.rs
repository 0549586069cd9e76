//! Store — time hierarchy of visitor counters.

pub mod model;
pub mod snapshot;
pub mod tree;

pub use model::{BucketDate, BucketKey, DayNode, MonthNode, VisitorCount, YearNode};
pub use snapshot::{DaySnapshot, MonthSnapshot, TreeSnapshot, YearSnapshot};
pub use tree::VisitorTree;
