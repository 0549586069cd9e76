//! Report — rendering the finished classifier.

pub mod json;
pub mod table;

use std::io::{self, Write};

use engine::VisitorClassifier;

pub use json::{write_json, JsonReport};
pub use table::write_table;

use crate::conf::{OutputFormat, ReportConfig};
use crate::ingest::IngestStats;

pub fn write_report<W: Write>(
    out: &mut W,
    classifier: &VisitorClassifier,
    ingest: IngestStats,
    config: &ReportConfig,
) -> io::Result<()> {
    match config.format {
        OutputFormat::Table => {
            write_table(out, classifier.tree(), config.granularity, config.min_year)
        }
        OutputFormat::Json => {
            write_json(out, &JsonReport::new(classifier, ingest, config.min_year))
        }
    }
}
