//! Access-log line parsing.
//!
//! - `model.rs`: parsed entry and error types
//! - `http_log.rs`: Common / Combined Log Format parser

pub mod http_log;
pub mod model;

pub use http_log::HttpLogParser;
pub use model::{AccessEntry, ParseError, RequestLine};

pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB
