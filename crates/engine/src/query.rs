//! Query — date strings to bucket keys.
//!
//! Accepts `DD/MM/YYYY`, `MM/YYYY` and `YYYY`, tried from most to least
//! specific. The shorter forms are completed with a fixed day/month so
//! chrono validates the calendar fields for all three. The year must be
//! written with exactly four digits.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::QueryError;
use crate::store::BucketKey;

const DAY_FORMAT: &str = "%d/%m/%Y";

impl FromStr for BucketKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if !has_full_year(s) {
            return Err(QueryError::UnrecognizedDate(s.to_string()));
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
            return Ok(BucketKey::Day(date.year(), date.month(), date.day()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("01/{}", s), DAY_FORMAT) {
            return Ok(BucketKey::Month(date.year(), date.month()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("01/01/{}", s), DAY_FORMAT) {
            return Ok(BucketKey::Year(date.year()));
        }

        Err(QueryError::UnrecognizedDate(s.to_string()))
    }
}

/// chrono's `%Y` takes fewer than four digits, so check the last field here.
fn has_full_year(s: &str) -> bool {
    s.rsplit('/')
        .next()
        .is_some_and(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
}
