// Access-log visitor report: config, parsing, gates, ingestion and output.

pub mod conf;
pub mod filter;
pub mod ingest;
pub mod parser;
pub mod report;
pub mod runtime;
