//! Classifier — streaming new/returning visitor classification.
//!
//! - `stream.rs`: the per-record state machine driving the store
//! - `rolling.rs`: distinct returning identifiers of the open buckets

pub mod rolling;
pub mod stream;

pub use rolling::RollingSets;
pub use stream::{ClassifierStats, Visit, VisitorClassifier};
