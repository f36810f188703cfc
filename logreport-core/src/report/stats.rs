use crate::report::types::{Aggregation, ReportRow};

/// Builds the report table for the already-ranked endpoints, preserving
/// their order.
pub fn build_table(agg: &Aggregation, ranked: &[&str]) -> Vec<ReportRow> {
    ranked
        .iter()
        .filter_map(|endpoint| {
            let acc = agg.per_endpoint.get(*endpoint)?;
            if acc.durations.is_empty() {
                return None;
            }

            let mut sorted = acc.durations.clone();
            sorted.sort_by(f64::total_cmp);

            Some(ReportRow {
                endpoint: (*endpoint).to_string(),
                count: acc.count,
                count_percent: round3(100.0 * acc.count as f64 / agg.good_lines as f64),
                time_sum: round3(acc.sum),
                time_avg: round3(acc.sum / acc.count as f64),
                time_percent: round3(100.0 * acc.sum / agg.grand_time_sum),
                time_max: round3(sorted[sorted.len() - 1]),
                time_median: round3(median_of_sorted(&sorted)),
            })
        })
        .collect()
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
