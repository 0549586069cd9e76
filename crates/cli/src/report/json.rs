//! Json — full tree dump with run counters.

use std::io::{self, Write};

use engine::{ClassifierStats, TreeSnapshot, VisitorClassifier};
use serde::Serialize;

use crate::ingest::IngestStats;

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub ingest: IngestStats,
    pub classifier: ClassifierStats,
    pub visitors: TreeSnapshot,
}

impl JsonReport {
    pub fn new(classifier: &VisitorClassifier, ingest: IngestStats, min_year: i32) -> Self {
        let mut visitors = classifier.snapshot();
        visitors.years.retain(|y| y.year >= min_year);
        Self {
            ingest,
            classifier: classifier.stats(),
            visitors,
        }
    }
}

pub fn write_json<W: Write>(out: &mut W, report: &JsonReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
