use chrono::NaiveDateTime;
use engine::record::CLF_TIMESTAMP_FORMAT;

use super::model::{AccessEntry, ParseError, RequestLine};
use super::MAX_LINE_SIZE;

const ERROR_PREVIEW_CHARS: usize = 120;

/// Parser for HTTP access logs (Common Log Format and Combined Log Format).
///
/// Extracts remote host, user, timestamp, request line, status code,
/// response size, referrer, and user-agent.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpLogParser;

impl HttpLogParser {
    pub fn parse(&self, raw: &[u8]) -> Result<AccessEntry, ParseError> {
        if raw.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(raw.len(), MAX_LINE_SIZE));
        }

        let text = std::str::from_utf8(raw)
            .map_err(|_| ParseError::NonUtf8)?
            .trim();

        // Format: host ident authuser [date] "request" status bytes ["referrer" "user-agent"]
        // Example: 127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326

        let open_bracket = text
            .find('[')
            .ok_or_else(|| ParseError::MissingData(preview(text)))?;
        let close_bracket = text[open_bracket..]
            .find(']')
            .map(|i| open_bracket + i)
            .ok_or_else(|| ParseError::MissingData(preview(text)))?;

        let prefix_parts: Vec<&str> = text[..open_bracket].split_whitespace().collect();
        if prefix_parts.len() < 3 {
            return Err(ParseError::MissingData(preview(text)));
        }
        let remote_addr = prefix_parts[0].to_string();
        let user = Some(prefix_parts[2])
            .filter(|s| *s != "-")
            .map(|s| s.to_string());

        let timestamp = parse_timestamp(&text[open_bracket + 1..close_bracket])?;

        let after_bracket = text[close_bracket + 1..].trim_start();

        let mut request = None;
        let mut status_code = None;
        let mut response_size = None;
        let mut referrer = None;
        let mut user_agent = None;

        // Extract the quoted request line: "METHOD /path HTTP/x.x"
        if let Some(request_str) = after_bracket.strip_prefix('"') {
            if let Some(quote_end) = request_str.find('"') {
                request = parse_request_line(&request_str[..quote_end]);
                let after_request = request_str[quote_end + 1..].trim_start();

                let status_parts: Vec<&str> = after_request.splitn(3, ' ').collect();
                status_code = status_parts.first().and_then(|s| s.parse::<u16>().ok());
                response_size = status_parts.get(1).and_then(|s| s.parse::<u64>().ok());

                // Combined Log Format adds quoted referrer and user-agent
                let remaining = status_parts.get(2).copied().unwrap_or("");
                (referrer, user_agent) = extract_quoted_fields(remaining);
            }
        }

        Ok(AccessEntry {
            remote_addr,
            user,
            timestamp,
            request,
            status_code,
            response_size,
            referrer,
            user_agent,
        })
    }
}

/// Parse the bracketed date, ignoring the zone offset.
fn parse_timestamp(bracketed: &str) -> Result<NaiveDateTime, ParseError> {
    let local = bracketed.split_whitespace().next().unwrap_or("");
    NaiveDateTime::parse_from_str(local, CLF_TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::Timestamp(preview(bracketed)))
}

/// Leading slice of `text` for error messages, cut on a char boundary.
fn preview(text: &str) -> String {
    match text.char_indices().nth(ERROR_PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn parse_request_line(line: &str) -> Option<RequestLine> {
    let mut parts = line.splitn(3, ' ');
    let method = parts.next().filter(|s| !s.is_empty())?;
    let path = parts.next().filter(|s| !s.is_empty())?;
    Some(RequestLine {
        method: method.to_string(),
        path: path.to_string(),
        protocol: parts.next().map(|s| s.to_string()),
    })
}

/// Extract referrer and user-agent from remaining quoted fields.
fn extract_quoted_fields(text: &str) -> (Option<String>, Option<String>) {
    let mut chars = text.chars();
    let referrer = extract_next_quoted(&mut chars);
    let user_agent = extract_next_quoted(&mut chars);
    (dash_as_none(referrer), dash_as_none(user_agent))
}

fn dash_as_none(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "-")
}

/// Extract the next quoted string from a char iterator.
fn extract_next_quoted(chars: &mut std::str::Chars<'_>) -> Option<String> {
    // Find opening quote
    loop {
        match chars.next() {
            Some('"') => break,
            Some(_) => continue,
            None => return None,
        }
    }
    // Read until closing quote
    let mut val = String::new();
    let mut escaped = false;
    for c in chars.by_ref() {
        if escaped {
            val.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Some(val);
        } else {
            val.push(c);
        }
    }
    if val.is_empty() { None } else { Some(val) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_common_log_format() {
        let parser = HttpLogParser;
        let sample = b"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] \"GET /apache_pb.gif HTTP/1.0\" 200 2326";
        let entry = parser.parse(sample).unwrap();
        assert_eq!(entry.remote_addr, "127.0.0.1");
        assert_eq!(entry.user, Some("frank".to_string()));
        assert_eq!(entry.timestamp.year(), 2000);
        assert_eq!(entry.timestamp.month(), 10);
        assert_eq!(entry.timestamp.day(), 10);
        assert_eq!(entry.timestamp.hour(), 13);
        let req = entry.request.unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/apache_pb.gif");
        assert_eq!(req.protocol, Some("HTTP/1.0".to_string()));
        assert_eq!(entry.status_code, Some(200));
        assert_eq!(entry.response_size, Some(2326));
        assert_eq!(entry.referrer, None);
    }

    #[test]
    fn test_parse_combined_log_format() {
        let parser = HttpLogParser;
        let sample = b"127.0.0.1 - - [29/Jan/2026:10:59:12 +0000] \"POST /api/v1/data HTTP/1.1\" 200 1024 \"https://example.com\" \"curl/7.68.0\"";
        let entry = parser.parse(sample).unwrap();
        assert_eq!(entry.user, None);
        assert_eq!(entry.path(), Some("/api/v1/data"));
        assert_eq!(entry.status_code, Some(200));
        assert_eq!(entry.referrer, Some("https://example.com".to_string()));
        assert_eq!(entry.user_agent, Some("curl/7.68.0".to_string()));
    }

    #[test]
    fn test_parse_dash_referrer() {
        let parser = HttpLogParser;
        let sample = b"10.0.0.1 - - [01/Feb/2026:12:00:00 +0000] \"GET / HTTP/1.1\" 304 0 \"-\" \"Mozilla/5.0\"";
        let entry = parser.parse(sample).unwrap();
        assert_eq!(entry.referrer, None);
        assert_eq!(entry.user_agent, Some("Mozilla/5.0".to_string()));
    }

    #[test]
    fn test_parse_escaped_quote_in_user_agent() {
        let parser = HttpLogParser;
        let sample = br#"10.0.0.1 - - [01/Feb/2026:12:00:00 +0000] "GET / HTTP/1.1" 200 5 "-" "odd \"agent\"""#;
        let entry = parser.parse(sample).unwrap();
        assert_eq!(entry.user_agent, Some("odd \"agent\"".to_string()));
    }

    #[test]
    fn test_parse_without_request_line() {
        let parser = HttpLogParser;
        let sample = b"10.0.0.1 - - [01/Feb/2026:12:00:00 +0000]";
        let entry = parser.parse(sample).unwrap();
        assert_eq!(entry.request, None);
        assert_eq!(entry.path(), None);
        assert_eq!(entry.status_code, None);
    }

    #[test]
    fn test_to_record() {
        let parser = HttpLogParser;
        let sample = b"127.0.0.1 - - [20/Apr/2022:12:34:56 +0000] \"GET / HTTP/1.1\" 200";
        let record = parser.parse(sample).unwrap().to_record();
        assert_eq!(record.identifier, "127.0.0.1");
        assert_eq!(record.bucket(), engine::BucketDate::new(2022, 4, 20));
    }

    #[test]
    fn test_parse_no_bracket() {
        let parser = HttpLogParser;
        let sample = b"Just some random text without brackets";
        assert!(matches!(parser.parse(sample), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_parse_short_prefix() {
        let parser = HttpLogParser;
        let sample = b"127.0.0.1 [20/Apr/2022:12:34:56 +0000] \"GET / HTTP/1.1\" 200";
        assert!(matches!(parser.parse(sample), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_parse_bad_timestamp() {
        let parser = HttpLogParser;
        let sample = b"127.0.0.1 - - [20/Foo/2022:12:34:56 +0000] \"GET / HTTP/1.1\" 200";
        assert!(matches!(parser.parse(sample), Err(ParseError::Timestamp(_))));
    }

    #[test]
    fn test_parse_non_utf8() {
        let parser = HttpLogParser;
        let sample = b"127.0.0.1 - - [20/Apr/2022:12:34:56 +0000] \"GET /\xff\xfe HTTP/1.1\" 200";
        assert!(matches!(parser.parse(sample), Err(ParseError::NonUtf8)));
    }

    #[test]
    fn test_missing_data_error_is_truncated() {
        let parser = HttpLogParser;
        let sample = "é".repeat(10_000);
        let err = parser.parse(sample.as_bytes()).unwrap_err();
        match err {
            ParseError::MissingData(shown) => {
                assert_eq!(shown.chars().count(), ERROR_PREVIEW_CHARS + 3);
                assert!(shown.ends_with("..."));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_preview_keeps_short_text() {
        assert_eq!(preview("no brackets"), "no brackets");
    }

    #[test]
    fn test_parse_line_too_large() {
        let parser = HttpLogParser;
        let sample = vec![b'a'; MAX_LINE_SIZE + 1];
        assert!(matches!(parser.parse(&sample), Err(ParseError::LineTooLarge(_, _))));
    }
}
