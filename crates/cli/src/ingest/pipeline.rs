//! Pipeline — raw lines to classifier, one at a time.
//!
//! Order per line: crawler gate on the raw bytes, parse, path gate on the
//! request path, classify. A line rejected at any step is counted and
//! skipped; only I/O failures and store sequencing bugs end the run.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use engine::{EngineError, Visit, VisitorClassifier};
use tracing::{debug, info, info_span, warn};

use super::stats::IngestStats;
use super::IngestError;
use crate::conf::ReportConfig;
use crate::filter::{self, FilterEngine, FilterError};
use crate::parser::{HttpLogParser, ParseError, MAX_LINE_SIZE};

/// What happened to a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Crawler,
    Malformed,
    Filtered,
    Counted(Visit),
}

pub struct Ingestor {
    classifier: VisitorClassifier,
    parser: HttpLogParser,
    crawlers: Option<FilterEngine>,
    paths: Option<FilterEngine>,
    stats: IngestStats,
}

impl Ingestor {
    pub fn new(crawlers: Option<FilterEngine>, paths: Option<FilterEngine>) -> Self {
        Self {
            classifier: VisitorClassifier::new(),
            parser: HttpLogParser,
            crawlers,
            paths,
            stats: IngestStats::default(),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Result<Self, FilterError> {
        let crawlers = filter::crawler_gate(&config.crawlers, config.crawler_case_sensitive)?;
        let paths = filter::path_gate(config.path_filter.as_deref())?;
        Ok(Self::new(crawlers, paths))
    }

    pub fn ingest_file(&mut self, path: &Path) -> Result<(), IngestError> {
        let file = File::open(path).map_err(|source| IngestError::Io {
            source_name: path.display().to_string(),
            source,
        })?;
        info!("Reading access log: {}", path.display());
        self.ingest_reader(&path.display().to_string(), BufReader::new(file))
    }

    /// Feed every line of `reader`. Lines are read as bytes so a single
    /// non-UTF8 line is skipped instead of failing the whole source. At most
    /// `MAX_LINE_SIZE` bytes of a line are buffered; longer lines are dropped.
    pub fn ingest_reader<R: BufRead>(
        &mut self,
        source_name: &str,
        mut reader: R,
    ) -> Result<(), IngestError> {
        let io_err = |source: io::Error| IngestError::Io {
            source_name: source_name.to_string(),
            source,
        };
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            let read = reader
                .by_ref()
                .take(MAX_LINE_SIZE as u64 + 1)
                .read_until(b'\n', &mut buf)
                .map_err(io_err)?;
            if read == 0 {
                break;
            }
            line_no += 1;

            // skipped-line warnings carry the source position
            let _span = info_span!("line", source = source_name, no = line_no).entered();
            if buf.len() > MAX_LINE_SIZE && buf.last() != Some(&b'\n') {
                let dropped = buf.len() + discard_line(&mut reader).map_err(io_err)?;
                self.skip_oversized(dropped);
                continue;
            }
            self.ingest_line(trim_line_ending(&buf))?;
        }

        self.stats.sources += 1;
        info!(source = source_name, lines = line_no, "Finished access log");
        Ok(())
    }

    fn skip_oversized(&mut self, len: usize) {
        warn!("Skipping line: {}", ParseError::LineTooLarge(len, MAX_LINE_SIZE));
        self.stats.lines += 1;
        self.stats.malformed += 1;
    }

    pub fn ingest_line(&mut self, raw: &[u8]) -> Result<LineOutcome, IngestError> {
        self.stats.lines += 1;

        if raw.iter().all(|b| b.is_ascii_whitespace()) {
            self.stats.blank += 1;
            return Ok(LineOutcome::Blank);
        }

        if let Some(gate) = &self.crawlers {
            if !gate.should_include(raw) {
                self.stats.crawlers += 1;
                return Ok(LineOutcome::Crawler);
            }
        }

        let entry = match self.parser.parse(raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping line: {}", e);
                self.stats.malformed += 1;
                return Ok(LineOutcome::Malformed);
            }
        };

        if let Some(gate) = &self.paths {
            let keep = entry.path().is_some_and(|p| gate.should_include(p.as_bytes()));
            if !keep {
                self.stats.filtered += 1;
                return Ok(LineOutcome::Filtered);
            }
        }

        match self.classifier.observe(&entry.to_record()) {
            Ok(visit) => {
                self.stats.records += 1;
                Ok(LineOutcome::Counted(visit))
            }
            Err(EngineError::EmptyIdentifier) | Err(EngineError::Timestamp { .. }) => {
                self.stats.malformed += 1;
                Ok(LineOutcome::Malformed)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn classifier(&self) -> &VisitorClassifier {
        &self.classifier
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Close the open buckets and hand back the classifier with the run's counters.
    pub fn finish(mut self) -> Result<(VisitorClassifier, IngestStats), IngestError> {
        self.classifier.flush()?;
        if let Some(gate) = &self.crawlers {
            let (scanned, kept, bytes) = gate.stats();
            debug!(scanned, kept, bytes, "Crawler gate");
        }
        info!(
            lines = self.stats.lines,
            records = self.stats.records,
            skipped = self.stats.skipped(),
            crawlers = self.stats.crawlers,
            malformed = self.stats.malformed,
            filtered = self.stats.filtered,
            parse_rate = self.stats.parse_rate(),
            visitors = self.classifier.distinct_visitors(),
            "Ingestion complete"
        );
        Ok((self.classifier, self.stats))
    }
}

/// Consume the rest of the current line, returning how many bytes were dropped.
fn discard_line<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut dropped = 0;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(dropped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(dropped + i + 1);
            }
            None => {
                let n = available.len();
                reader.consume(n);
                dropped += n;
            }
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
