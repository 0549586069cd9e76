use thiserror::Error;

use crate::store::BucketKey;

/// Failures raised by the time hierarchy store.
///
/// These indicate a sequencing bug in the caller (a counter was touched
/// before its bucket was created), not bad input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Bucket does not exist: {0}")]
    MissingBucket(BucketKey),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid timestamp '{input}': {source}")]
    Timestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Empty visitor identifier")]
    EmptyIdentifier,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unrecognized date '{0}' (expected DD/MM/YYYY, MM/YYYY or YYYY)")]
    UnrecognizedDate(String),
}
