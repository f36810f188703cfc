use crate::report::error::ReportError;
use crate::report::types::{Aggregation, EndpointAccumulator, ParseOutcome};

use std::io;
use std::path::Path;

/// Folds the parse-outcome stream into per-endpoint totals.
///
/// Malformed lines are counted, never raised; the error-rate circuit
/// breaker fires once, after the stream is exhausted, against the counts
/// actually observed. An I/O error from the stream aborts immediately.
pub fn aggregate<I>(outcomes: I, log_path: &Path, error_limit: f64) -> Result<Aggregation, ReportError>
where
    I: IntoIterator<Item = io::Result<ParseOutcome>>,
{
    let mut agg = Aggregation::default();

    for outcome in outcomes {
        match outcome.map_err(|e| ReportError::io(log_path, e))? {
            ParseOutcome::Record { endpoint, duration } => {
                let first_seen = agg.per_endpoint.len();
                let acc = agg
                    .per_endpoint
                    .entry(endpoint)
                    .or_insert_with(|| EndpointAccumulator::new(first_seen));

                acc.count += 1;
                acc.sum += duration;
                acc.durations.push(duration);

                agg.good_lines += 1;
                agg.grand_time_sum += duration;
            }
            ParseOutcome::Malformed => {
                agg.bad_lines += 1;
                tracing::debug!(line = agg.good_lines + agg.bad_lines, "unparsable line");
            }
        }
    }

    let total = agg.good_lines + agg.bad_lines;
    if total > 0 {
        let ratio = agg.bad_lines as f64 / total as f64 * 100.0;
        if ratio > error_limit {
            return Err(ReportError::ThresholdExceeded {
                ratio,
                limit: error_limit,
            });
        }
    }

    if agg.grand_time_sum <= 0.0 {
        return Err(ReportError::DegenerateInput);
    }

    Ok(agg)
}
