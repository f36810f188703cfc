use crate::report::types::EndpointAccumulator;

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

/// Picks the `n` endpoints with the greatest aggregate time, best first.
///
/// A bounded min-heap keeps the cost at `O(M log N)` for `M` distinct
/// endpoints; equal sums rank by first-encounter order, so the result is
/// reproducible across runs on identical input.
pub fn top_by_time(per_endpoint: &HashMap<String, EndpointAccumulator>, n: usize) -> Vec<&str> {
    if n == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Candidate>> = BinaryHeap::with_capacity(n + 1);
    for (endpoint, acc) in per_endpoint {
        heap.push(Reverse(Candidate {
            sum: acc.sum,
            first_seen: acc.first_seen,
            endpoint: endpoint.as_str(),
        }));

        if heap.len() > n {
            heap.pop();
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(c)| c.endpoint)
        .collect()
}

struct Candidate<'a> {
    sum: f64,
    first_seen: usize,
    endpoint: &'a str,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Greater = bigger time sum, or same sum seen earlier.
        self.sum
            .total_cmp(&other.sum)
            .then_with(|| other.first_seen.cmp(&self.first_seen))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}
