//! Ingest — feeding access-log sources through the gates into the classifier.

pub mod pipeline;
pub mod stats;

use thiserror::Error;

pub use pipeline::{Ingestor, LineOutcome};
pub use stats::IngestStats;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] engine::EngineError),

    #[error(transparent)]
    Store(#[from] engine::StoreError),
}
