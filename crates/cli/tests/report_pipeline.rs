use std::io::Write;

use engine::{BucketKey, VisitorCount};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use visitlog::conf::{Granularity, OutputFormat, ReportConfig};
use visitlog::ingest::Ingestor;
use visitlog::report::write_report;

fn log_file<S: AsRef<str>>(lines: &[S]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp log");
    for line in lines {
        writeln!(file, "{}", line.as_ref()).expect("write temp log");
    }
    file
}

fn line(ip: &str, date: &str, path: &str, agent: &str) -> String {
    format!(
        "{} - - [{}:10:00:00 +0000] \"GET {} HTTP/1.1\" 200 512 \"-\" \"{}\"",
        ip, date, path, agent
    )
}

fn run(files: &[&NamedTempFile], config: &ReportConfig) -> String {
    let mut ingestor = Ingestor::from_config(config).expect("build ingestor");
    for file in files {
        ingestor.ingest_file(file.path()).expect("ingest file");
    }
    let (classifier, stats) = ingestor.finish().expect("finish");

    let mut out = Vec::new();
    write_report(&mut out, &classifier, stats, config).expect("write report");
    String::from_utf8(out).expect("utf8 report")
}

#[test]
fn test_single_file_month_report() {
    let file = log_file(&[
        line("127.0.0.1", "20/Apr/2022", "/", "Mozilla/5.0"),
        line("10.0.0.2", "20/Apr/2022", "/", "Mozilla/5.0"),
        line("127.0.0.1", "21/Apr/2022", "/", "Mozilla/5.0"),
        line("10.0.0.3", "01/May/2022", "/", "Mozilla/5.0"),
    ]);

    let report = run(&[&file], &ReportConfig::default());
    assert_eq!(report, "month new old\n2022/4 2 1\n2022/5 1 0\n");
}

#[test]
fn test_rotated_files_are_one_stream() {
    let older = log_file(&[
        line("1.1.1.1", "30/Dec/2021", "/", "Mozilla/5.0"),
        line("2.2.2.2", "31/Dec/2021", "/", "Mozilla/5.0"),
    ]);
    let newer = log_file(&[
        line("1.1.1.1", "01/Jan/2022", "/", "Mozilla/5.0"),
        line("2.2.2.2", "01/Jan/2022", "/", "Mozilla/5.0"),
        line("3.3.3.3", "02/Jan/2022", "/", "Mozilla/5.0"),
    ]);

    let config = ReportConfig {
        granularity: Granularity::Year,
        ..ReportConfig::default()
    };
    let report = run(&[&older, &newer], &config);
    assert_eq!(report, "year new old\n2021 2 0\n2022 1 2\n");
}

#[test]
fn test_crawlers_and_garbage_are_skipped() {
    let file = log_file(&[
        line("66.249.66.1", "20/Apr/2022", "/", "GoogleBot/2.1"),
        "Log entry missing data".to_string(),
        line("5.5.5.5", "20/Apr/2022", "/", "UptimeRobot/2.0"),
        line("127.0.0.1", "20/Apr/2022", "/", "Mozilla/5.0"),
    ]);

    let mut ingestor = Ingestor::from_config(&ReportConfig::default()).unwrap();
    ingestor.ingest_file(file.path()).unwrap();
    let (classifier, stats) = ingestor.finish().unwrap();

    assert_eq!(stats.crawlers, 2);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.records, 1);
    assert_eq!(classifier.query(BucketKey::Day(2022, 4, 20)), VisitorCount::new(1, 0));
    assert_eq!(classifier.visitors_from("20/04/2022").unwrap().new, 1);
}

#[test]
fn test_empty_input_prints_header_only() {
    let file = log_file::<&str>(&[]);
    let report = run(&[&file], &ReportConfig::default());
    assert_eq!(report, "month new old\n");
}

#[test]
fn test_json_report_contains_tree() {
    let file = log_file(&[
        line("127.0.0.1", "20/Apr/2022", "/blog/a", "Mozilla/5.0"),
        line("127.0.0.1", "20/Apr/2022", "/blog/b", "Mozilla/5.0"),
        line("10.0.0.9", "20/Apr/2022", "/shop", "Mozilla/5.0"),
    ]);
    let config = ReportConfig {
        format: OutputFormat::Json,
        path_filter: Some("/blog".to_string()),
        ..ReportConfig::default()
    };

    let report = run(&[&file], &config);
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["ingest"]["filtered"], 1);
    assert_eq!(value["visitors"]["total"]["new"], 1);
    let day = &value["visitors"]["years"][0]["months"][0]["days"][0];
    assert_eq!(day["day"], 20);
    assert_eq!(day["new"], 1);
    assert_eq!(day["old"], 1);
}
