use crate::report::parse::parse_line;
use crate::report::{LogLines, ParseOutcome};

use chrono::NaiveDate;
use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use tempfile::tempdir;

const SAMPLE: &str = "1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] \
    \"GET /api/v3/banner/25019354 HTTP/1.1\" 200 927 \"-\" \"Lynx/2.8.8dev.9\" \"-\" \
    \"1498697422-2190034393-4708-9752759\" \"dc7161be3\" 0.390";

fn record(endpoint: &str, duration: f64) -> ParseOutcome {
    ParseOutcome::Record {
        endpoint: endpoint.to_string(),
        duration,
    }
}

#[test]
fn full_access_line_parses() {
    assert_eq!(
        parse_line(SAMPLE),
        record("GET /api/v3/banner/25019354", 0.39)
    );
}

#[test]
fn post_and_head_methods_parse() {
    assert_eq!(
        parse_line("\"POST /api/1/photogenic_banners/ HTTP/1.1\" 200 110 0.072"),
        record("POST /api/1/photogenic_banners/", 0.072)
    );
    assert_eq!(
        parse_line("\"HEAD /slots/3938/ HTTP/1.1\" 302 0 0.001"),
        record("HEAD /slots/3938/", 0.001)
    );
}

#[test]
fn unknown_method_is_malformed() {
    // Assert
    assert_eq!(
        parse_line("\"PUT /api/v2/slot/ HTTP/1.1\" 200 12 0.5"),
        ParseOutcome::Malformed
    );
}

#[test]
fn method_inside_a_word_does_not_count() {
    assert_eq!(
        parse_line("BUDGET /not/a/request HTTP/1.1 0.5"),
        ParseOutcome::Malformed
    );
}

#[test]
fn missing_duration_is_malformed() {
    assert_eq!(
        parse_line("\"GET /api/v2/slot/4705/groups HTTP/1.1\" 200 2613"),
        ParseOutcome::Malformed
    );
}

#[test]
fn path_must_be_followed_by_more_fields() {
    // The request never ends the line in a well-formed record.
    assert_eq!(parse_line("GET /api/v2/slot"), ParseOutcome::Malformed);
}

#[test]
fn bare_number_line_is_malformed() {
    assert_eq!(parse_line("0.133"), ParseOutcome::Malformed);
    assert_eq!(parse_line(""), ParseOutcome::Malformed);
}

#[test]
fn duration_grammar_accepts_signs_fractions_and_exponents() {
    for (token, expected) in [
        ("1.", 1.0),
        (".5", 0.5),
        ("+2.25", 2.25),
        ("-1.5", -1.5),
        ("3e-2", 0.03),
        ("1.2E3", 1200.0),
    ] {
        let line = format!("GET /a HTTP/1.1 {token}");
        assert_eq!(parse_line(&line), record("GET /a", expected), "{token}");
    }
}

#[test]
fn duration_grammar_rejects_non_numeric_tails() {
    for token in ["fast", "1.2.3", "0x1f", "1e", "nan", "inf", ".", "-"] {
        let line = format!("GET /a HTTP/1.1 {token}");
        assert_eq!(parse_line(&line), ParseOutcome::Malformed, "{token}");
    }
}

#[test]
fn plain_file_streams_outcomes_in_order() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nginx-access-ui.log-20170630");
    fs::write(&path, "GET /a x 1.0\ngarbage\nPOST /b x 2.0\n").unwrap();
    let log = crate::report::LogFile {
        path,
        date: NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
        compressed: false,
    };

    // Act
    let outcomes: Vec<_> = LogLines::open(&log)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    // Assert
    assert_eq!(
        outcomes,
        vec![
            record("GET /a", 1.0),
            ParseOutcome::Malformed,
            record("POST /b", 2.0),
        ]
    );
}

#[test]
fn gzip_file_is_transparently_decompressed() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nginx-access-ui.log-20170630.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder
        .write_all(b"GET /gz x 0.25\nGET /gz x 0.75\n")
        .unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    let log = crate::report::LogFile {
        path,
        date: NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
        compressed: true,
    };

    // Act
    let outcomes: Vec<_> = LogLines::open(&log)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    // Assert
    assert_eq!(outcomes, vec![record("GET /gz", 0.25), record("GET /gz", 0.75)]);
}

#[test]
fn missing_file_fails_to_open() {
    let log = crate::report::LogFile {
        path: std::path::PathBuf::from("/nonexistent/nginx-access-ui.log-20170630"),
        date: NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
        compressed: false,
    };

    assert!(LogLines::open(&log).is_err());
}
