use chrono::NaiveDateTime;

use crate::error::EngineError;
use crate::store::BucketDate;

/// Timestamp layout inside the brackets of a Common Log Format line.
pub const CLF_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// One visit as handed to the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    pub identifier: String,
    pub timestamp: NaiveDateTime,
}

impl VisitRecord {
    pub fn new(identifier: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            identifier: identifier.into(),
            timestamp,
        }
    }

    /// Build a record from a CLF timestamp such as `[20/Apr/2022:12:34:56 +0000]`.
    ///
    /// Surrounding brackets are optional. The zone offset is ignored: the
    /// visit is bucketed under the calendar date written in the log.
    pub fn from_clf(identifier: impl Into<String>, raw: &str) -> Result<Self, EngineError> {
        let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
        let local = trimmed.split_whitespace().next().unwrap_or("");

        let timestamp = NaiveDateTime::parse_from_str(local, CLF_TIMESTAMP_FORMAT).map_err(
            |source| EngineError::Timestamp {
                input: raw.to_string(),
                source,
            },
        )?;

        Ok(Self::new(identifier, timestamp))
    }

    pub fn bucket(&self) -> BucketDate {
        BucketDate::from_datelike(&self.timestamp)
    }
}
