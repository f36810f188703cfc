use crate::report::{ParseOutcome, ReportError, aggregate};

use pretty_assertions::assert_eq;
use std::io;
use std::path::Path;

fn record(endpoint: &str, duration: f64) -> io::Result<ParseOutcome> {
    Ok(ParseOutcome::Record {
        endpoint: endpoint.to_string(),
        duration,
    })
}

fn malformed() -> io::Result<ParseOutcome> {
    Ok(ParseOutcome::Malformed)
}

fn log_path() -> &'static Path {
    Path::new("test.log")
}

#[test]
fn per_endpoint_totals_accumulate() {
    // Arrange: two endpoints, two requests each
    let outcomes = vec![
        record("GET /a", 1.0),
        record("GET /a", 3.0),
        record("POST /b", 2.0),
        record("POST /b", 2.0),
    ];

    // Act
    let agg = aggregate(outcomes, log_path(), 50.0).unwrap();

    // Assert
    assert_eq!(agg.good_lines, 4);
    assert_eq!(agg.bad_lines, 0);
    assert_eq!(agg.grand_time_sum, 8.0);

    let a = &agg.per_endpoint["GET /a"];
    assert_eq!(a.count, 2);
    assert_eq!(a.sum, 4.0);
    assert_eq!(a.durations, vec![1.0, 3.0]);
    assert_eq!(a.first_seen, 0);

    let b = &agg.per_endpoint["POST /b"];
    assert_eq!(b.count, 2);
    assert_eq!(b.sum, 4.0);
    assert_eq!(b.first_seen, 1);
}

#[test]
fn malformed_lines_are_counted_not_fatal() {
    // Arrange
    let outcomes = vec![record("GET /a", 1.0), malformed(), record("GET /a", 2.0)];

    // Act
    let agg = aggregate(outcomes, log_path(), 50.0).unwrap();

    // Assert
    assert_eq!(agg.good_lines, 2);
    assert_eq!(agg.bad_lines, 1);
    assert_eq!(agg.good_lines + agg.bad_lines, 3);
}

#[test]
fn breaker_trips_above_the_limit() {
    // Arrange: 6 of 10 lines malformed, limit 50%
    let mut outcomes = Vec::new();
    for _ in 0..6 {
        outcomes.push(malformed());
    }
    for _ in 0..4 {
        outcomes.push(record("GET /a", 1.0));
    }

    // Act
    let err = aggregate(outcomes, log_path(), 50.0).unwrap_err();

    // Assert
    match err {
        ReportError::ThresholdExceeded { ratio, limit } => {
            assert_eq!(ratio, 60.0);
            assert_eq!(limit, 50.0);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn breaker_does_not_trip_exactly_at_the_limit() {
    // Arrange: exactly 50% bad against a 50% limit
    let outcomes = vec![
        malformed(),
        record("GET /a", 1.0),
        malformed(),
        record("GET /a", 1.0),
    ];

    // Act
    let agg = aggregate(outcomes, log_path(), 50.0).unwrap();

    // Assert
    assert_eq!(agg.bad_lines, 2);
}

#[test]
fn all_zero_durations_are_degenerate() {
    // Arrange
    let outcomes = vec![record("GET /a", 0.0), record("GET /b", 0.0)];

    // Act
    let err = aggregate(outcomes, log_path(), 50.0).unwrap_err();

    // Assert
    assert!(matches!(err, ReportError::DegenerateInput));
}

#[test]
fn empty_stream_is_degenerate() {
    let err = aggregate(Vec::new(), log_path(), 50.0).unwrap_err();

    assert!(matches!(err, ReportError::DegenerateInput));
}

#[test]
fn threshold_wins_over_degenerate_input() {
    // Arrange: everything malformed, so both conditions hold
    let outcomes = vec![malformed(), malformed()];

    // Act
    let err = aggregate(outcomes, log_path(), 50.0).unwrap_err();

    // Assert
    assert!(matches!(err, ReportError::ThresholdExceeded { .. }));
}

#[test]
fn stream_io_errors_abort_immediately() {
    // Arrange
    let outcomes = vec![
        record("GET /a", 1.0),
        Err(io::Error::other("disk gone")),
        record("GET /a", 1.0),
    ];

    // Act
    let err = aggregate(outcomes, log_path(), 50.0).unwrap_err();

    // Assert
    match err {
        ReportError::Io { path, .. } => assert_eq!(path, log_path()),
        other => panic!("unexpected error: {:?}", other),
    }
}
