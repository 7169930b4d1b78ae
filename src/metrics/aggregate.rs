use std::collections::BTreeMap;

use super::types::{RunStats, Sample, TRANSPORT_FAILURE_STATUS};

/// Minimum sample counts for percentile resolution; below these the maximum
/// observed latency stands in as a conservative upper bound.
const P95_MIN_SAMPLES: usize = 20;
const P99_MIN_SAMPLES: usize = 100;

/// Reduces a run's samples into aggregate statistics.
///
/// Purely functional: identical input yields identical output.
#[must_use]
pub fn aggregate(samples: &[Sample]) -> RunStats {
    let total = samples.len() as u64;
    let successful = samples.iter().filter(|sample| sample.success).count() as u64;
    let failed = total.saturating_sub(successful);
    let success_rate_pct = if total == 0 {
        0.0
    } else {
        (100.0 * successful as f64 / total as f64).clamp(0.0, 100.0)
    };

    let mut status_counts: BTreeMap<u16, u64> = BTreeMap::new();
    for sample in samples {
        let bucket = sample.status_code.unwrap_or(TRANSPORT_FAILURE_STATUS);
        let count = status_counts.entry(bucket).or_insert(0);
        *count = count.saturating_add(1);
    }

    let mut latencies_ms: Vec<f64> = samples
        .iter()
        .filter(|sample| sample.status_code.is_some())
        .map(|sample| sample.elapsed_ms())
        .collect();
    latencies_ms.sort_by(f64::total_cmp);

    let min_ms = latencies_ms.first().copied().unwrap_or(0.0);
    let max_ms = latencies_ms.last().copied().unwrap_or(0.0);
    let avg_ms = if latencies_ms.is_empty() {
        0.0
    } else {
        latencies_ms.iter().sum::<f64>() / latencies_ms.len() as f64
    };
    let median_ms = quantile(&latencies_ms, 0.5);
    let p95_ms = if latencies_ms.len() >= P95_MIN_SAMPLES {
        quantile(&latencies_ms, 0.95)
    } else {
        max_ms
    };
    let p99_ms = if latencies_ms.len() >= P99_MIN_SAMPLES {
        quantile(&latencies_ms, 0.99)
    } else {
        max_ms
    };

    RunStats {
        total,
        successful,
        failed,
        success_rate_pct,
        latencies_ms,
        status_counts,
        avg_ms,
        min_ms,
        max_ms,
        median_ms,
        p95_ms,
        p99_ms,
    }
}

/// Linear interpolation between closest ranks on an ascending sample.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let rank = q * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let lo_value = sorted.get(lo).copied().unwrap_or(0.0);
    let hi_value = sorted.get(hi).copied().unwrap_or(lo_value);
    lo_value + (hi_value - lo_value) * (rank - lo as f64)
}
