use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// The newest access log discovered in the log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub compressed: bool,
}

/// Outcome of parsing a single log line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Record { endpoint: String, duration: f64 },
    Malformed,
}

/// Running per-endpoint totals collected during the aggregation pass.
///
/// Invariants: `sum == durations.iter().sum()` and
/// `count == durations.len() as u64`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointAccumulator {
    pub count: u64,
    pub durations: Vec<f64>,
    pub sum: f64,
    /// 0-based index of the endpoint's first appearance in the stream;
    /// drives the tie-break for equal time sums.
    pub first_seen: usize,
}

impl EndpointAccumulator {
    pub fn new(first_seen: usize) -> Self {
        Self {
            first_seen,
            ..Self::default()
        }
    }
}

/// Everything a single pass over the log produced.
///
/// Invariants: `grand_time_sum` equals the sum of all per-endpoint sums,
/// `good_lines` the sum of all per-endpoint counts.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub per_endpoint: HashMap<String, EndpointAccumulator>,
    pub good_lines: u64,
    pub bad_lines: u64,
    pub grand_time_sum: f64,
}

/// One row of the rendered report table.
///
/// The serialized key names and the fixed 3-decimal formatting are the
/// contract the HTML template's table script expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "url")]
    pub endpoint: String,
    pub count: u64,
    #[serde(rename = "count_perc", serialize_with = "three_decimals")]
    pub count_percent: f64,
    #[serde(serialize_with = "three_decimals")]
    pub time_sum: f64,
    #[serde(serialize_with = "three_decimals")]
    pub time_avg: f64,
    #[serde(rename = "time_perc", serialize_with = "three_decimals")]
    pub time_percent: f64,
    #[serde(serialize_with = "three_decimals")]
    pub time_max: f64,
    #[serde(rename = "time_med", serialize_with = "three_decimals")]
    pub time_median: f64,
}

fn three_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.3}"))
}
