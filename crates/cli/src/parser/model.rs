use chrono::NaiveDateTime;
use engine::VisitRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Log entry missing data: {0}")]
    MissingData(String),

    #[error("Invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("Line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),

    #[error("Non-UTF8 content")]
    NonUtf8,
}

/// One access-log line, split into the fields the report cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    /// Client address; the visitor identifier
    pub remote_addr: String,
    pub user: Option<String>,
    pub timestamp: NaiveDateTime,
    pub request: Option<RequestLine>,
    pub status_code: Option<u16>,
    pub response_size: Option<u64>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,          // GET, POST, etc.
    pub path: String,            // /blog/index.html
    pub protocol: Option<String>, // HTTP/1.1
}

impl AccessEntry {
    pub fn path(&self) -> Option<&str> {
        self.request.as_ref().map(|r| r.path.as_str())
    }

    pub fn to_record(&self) -> VisitRecord {
        VisitRecord::new(self.remote_addr.clone(), self.timestamp)
    }
}
