//! Model — ReportConfig and related structs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::filter::DEFAULT_CRAWLERS;

/// Years before this are treated as mis-parsed zero dates and left out of reports.
pub const DEFAULT_MIN_YEAR: i32 = 1970;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Lines containing any of these tokens are dropped before parsing
    pub crawlers: Vec<String>,
    pub crawler_case_sensitive: bool,
    /// Only count requests whose path contains this fragment
    pub path_filter: Option<String>,
    pub min_year: i32,
    pub granularity: Granularity,
    pub format: OutputFormat,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStyle {
    Json,
    Pretty,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            crawlers: DEFAULT_CRAWLERS.iter().map(|s| s.to_string()).collect(),
            crawler_case_sensitive: true,
            path_filter: None,
            min_year: DEFAULT_MIN_YEAR,
            granularity: Granularity::Month,
            format: OutputFormat::Table,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogStyle::Pretty,
        }
    }
}
