//! Streaming visitor statistics engine.
//!
//! Records are fed in non-decreasing time order to a [`VisitorClassifier`],
//! which keeps a year → month → day tree of new/returning visitor counts.
//! The engine performs no I/O: callers parse log lines into
//! [`VisitRecord`]s and read results back through queries or a full
//! [`TreeSnapshot`] dump.

pub mod classifier;
pub mod error;
pub mod query;
pub mod record;
pub mod store;

pub use classifier::{ClassifierStats, Visit, VisitorClassifier};
pub use error::{EngineError, QueryError, StoreError};
pub use record::VisitRecord;
pub use store::{BucketDate, BucketKey, TreeSnapshot, VisitorCount, VisitorTree};
