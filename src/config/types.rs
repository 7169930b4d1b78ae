use serde::Deserialize;

use crate::args::ByteRange;

/// Subset of CLI options accepted from a config file. Durations are strings
/// in the same `ms/s/m/h` format the CLI accepts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub concurrency: Option<usize>,
    pub payload_size: Option<ByteRange>,
    pub data: Option<String>,
    pub expected_status: Option<u16>,
    pub expect_json: Option<bool>,
    pub threshold: Option<f64>,
    pub strict: Option<bool>,
    pub request_timeout: Option<String>,
    pub connect_timeout: Option<String>,
    pub log_file: Option<String>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}
