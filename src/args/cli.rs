use clap::Parser;
use std::time::Duration;

use super::defaults::DEFAULT_PROBE_BODY;
use super::parsers::{
    parse_duration_arg, parse_positive_u64, parse_positive_usize, parse_threshold,
};
use super::types::{ByteRange, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Bounded-concurrency HTTP load-testing and verification harness - fire N requests with at most C in flight, aggregate latency percentiles, and pass/fail the run."
)]
pub struct VerifyArgs {
    /// Target URL for the verification run
    #[arg(long, short)]
    pub url: Option<String>,

    /// Total number of requests to dispatch
    #[arg(long, short = 'n', default_value = "1000", value_parser = parse_positive_u64)]
    pub requests: PositiveU64,

    /// Maximum number of requests in flight at any instant
    #[arg(long, short = 'c', default_value = "50", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Synthesize a JSON body per request, sized within 'min-max' bytes
    #[arg(long = "payload-size", conflicts_with = "data")]
    pub payload_size: Option<ByteRange>,

    /// Fixed request body sent with every request
    #[arg(long, short, default_value = DEFAULT_PROBE_BODY)]
    pub data: String,

    /// Status code that classifies a response as successful
    #[arg(long = "expected-status", default_value = "200")]
    pub expected_status: u16,

    /// Require response bodies to parse as JSON for a response to count as successful
    #[arg(long = "expect-json")]
    pub expect_json: bool,

    /// Success-rate percentage required for a pass verdict
    #[arg(long, default_value = "95.0", value_parser = parse_threshold)]
    pub threshold: f64,

    /// Fail the run when any request failed, regardless of the success rate
    #[arg(long)]
    pub strict: bool,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "request-timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Connection timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Append one CSV line per completed request to this file
    #[arg(long = "log-file")]
    pub log_file: Option<String>,

    /// Configuration file (.toml or .json)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
