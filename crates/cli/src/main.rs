use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine::BucketKey;
use tracing::{info, warn};

use visitlog::conf::{Granularity, OutputFormat, ReportConfig};
use visitlog::ingest::Ingestor;
use visitlog::report;
use visitlog::runtime::boot;

#[derive(Parser, Debug)]
#[command(
    name = "visitlog",
    version,
    about = "New and returning visitors per year, month and day from web server access logs"
)]
struct Cli {
    /// Access log files, in chronological order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    granularity: Option<Granularity>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only count requests whose path contains this fragment
    #[arg(long)]
    path_filter: Option<String>,

    /// Leave years before this out of the report
    #[arg(long)]
    min_year: Option<i32>,

    /// Print the counts for one DD/MM/YYYY, MM/YYYY or YYYY bucket instead of the report
    #[arg(long)]
    query: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut ReportConfig) {
        if let Some(granularity) = self.granularity {
            config.granularity = granularity;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(path) = &self.path_filter {
            config.path_filter = Some(path.clone());
        }
        if let Some(year) = self.min_year {
            config.min_year = year;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let basic_tracing = boot::init_logging_basic();

    let mut config = ReportConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Configuration validation failed")?;

    let query = cli
        .query
        .as_deref()
        .map(str::parse::<BucketKey>)
        .transpose()
        .context("Invalid --query date")?;

    drop(basic_tracing);
    boot::init_logging(&config.logging);

    info!(
        "Crawler tokens: {}, path filter: {}",
        config.crawlers.len(),
        config.path_filter.as_deref().unwrap_or("none")
    );

    let mut ingestor = Ingestor::from_config(&config).context("Failed to build line filters")?;
    for path in &cli.files {
        ingestor
            .ingest_file(path)
            .with_context(|| format!("Failed to ingest {}", path.display()))?;
    }
    let (classifier, stats) = ingestor.finish().context("Failed to finalize visitor counts")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match query {
        Some(key) => {
            if !classifier.tree().contains(key) {
                warn!("No records fall in {}", key);
            }
            writeln!(out, "{} {}", key, classifier.query(key))?
        }
        None => report::write_report(&mut out, &classifier, stats, &config)?,
    }
    out.flush()?;

    Ok(())
}
