//! Verdict policy and console reporting.

use std::process::ExitCode;

use crate::metrics::{RunStats, TRANSPORT_FAILURE_STATUS};


/// Success-rate threshold applied when none is configured.
pub const DEFAULT_THRESHOLD_PCT: f64 = 95.0;
/// Exit code for runs cut short by an external interrupt, distinct from a
/// verification failure.
const INTERRUPTED_EXIT_CODE: u8 = 2;

/// Pass/fail policy applied to a completed run.
#[derive(Debug, Clone)]
pub struct VerdictPolicy {
    pub threshold_pct: f64,
    pub require_zero_failures: bool,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            require_zero_failures: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    Interrupted,
}

impl Verdict {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Verdict::Pass => ExitCode::SUCCESS,
            Verdict::Fail => ExitCode::FAILURE,
            Verdict::Interrupted => ExitCode::from(INTERRUPTED_EXIT_CODE),
        }
    }
}

/// Classifies a run against the policy. An interrupted run never claims
/// success, regardless of the rate observed so far.
#[must_use]
pub fn evaluate(stats: &RunStats, policy: &VerdictPolicy, interrupted: bool) -> Verdict {
    if interrupted {
        return Verdict::Interrupted;
    }
    if policy.require_zero_failures && stats.failed > 0 {
        return Verdict::Fail;
    }
    if stats.success_rate_pct >= policy.threshold_pct {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

pub fn print_summary(stats: &RunStats, verdict: Verdict) {
    println!("=== Verification Results ===");
    println!("Total Requests: {}", stats.total);
    println!("Successful Requests: {}", stats.successful);
    println!("Failed Requests: {}", stats.failed);
    println!("Success Rate: {:.2}%", stats.success_rate_pct);

    if !stats.latencies_ms.is_empty() {
        println!();
        println!("Response Time Statistics (ms):");
        println!("Average: {:.2}", stats.avg_ms);
        println!("Min: {:.2}", stats.min_ms);
        println!("Max: {:.2}", stats.max_ms);
        println!("Median: {:.2}", stats.median_ms);
        println!("95th percentile: {:.2}", stats.p95_ms);
        println!("99th percentile: {:.2}", stats.p99_ms);
    }

    if !stats.status_counts.is_empty() {
        println!();
        println!("HTTP Status Codes:");
        for (status, count) in &stats.status_counts {
            if *status == TRANSPORT_FAILURE_STATUS {
                println!("  none (transport error): {}", count);
            } else {
                println!("  {}: {}", status, count);
            }
        }
    }

    println!();
    match verdict {
        Verdict::Pass => println!("Verdict: PASS"),
        Verdict::Fail => println!("Verdict: FAIL"),
        Verdict::Interrupted => println!("Verdict: INTERRUPTED"),
    }
}
