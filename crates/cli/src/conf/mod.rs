//! Conf module — configuration model and loading.

pub mod load;
pub mod model;

pub use load::ConfigError;
pub use model::{Granularity, LogStyle, LoggingConfig, OutputFormat, ReportConfig, DEFAULT_MIN_YEAR};
