use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::parsers::parse_duration_arg;
use crate::args::{PositiveU64, PositiveUsize, VerifyArgs};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. A value is only taken from
/// the file when the matching flag was left at its CLI default.
///
/// # Errors
///
/// Returns an error when a config value fails the same validation its CLI
/// counterpart would.
pub fn apply_config(
    args: &mut VerifyArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = PositiveU64::try_from(requests)
            .map_err(|err| invalid_value("requests", &err.to_string()))?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = PositiveUsize::try_from(concurrency)
            .map_err(|err| invalid_value("concurrency", &err.to_string()))?;
    }

    if !is_cli(matches, "payload_size")
        && let Some(payload_size) = config.payload_size.clone()
    {
        args.payload_size = Some(payload_size);
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "expected_status")
        && let Some(status) = config.expected_status
    {
        args.expected_status = status;
    }

    if !is_cli(matches, "expect_json")
        && let Some(expect_json) = config.expect_json
    {
        args.expect_json = expect_json;
    }

    if !is_cli(matches, "threshold")
        && let Some(threshold) = config.threshold
    {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(invalid_value("threshold", "must be within 0-100"));
        }
        args.threshold = threshold;
    }

    if !is_cli(matches, "strict")
        && let Some(strict) = config.strict
    {
        args.strict = strict;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.request_timeout.as_deref()
    {
        args.request_timeout = parse_duration_arg(timeout)
            .map_err(|err| invalid_value("request_timeout", &err.to_string()))?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_deref()
    {
        args.connect_timeout = parse_duration_arg(timeout)
            .map_err(|err| invalid_value("connect_timeout", &err.to_string()))?;
    }

    if !is_cli(matches, "log_file")
        && let Some(log_file) = config.log_file.clone()
    {
        args.log_file = Some(log_file);
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .is_some_and(|source| source != ValueSource::DefaultValue)
}

fn invalid_value(field: &'static str, message: &str) -> AppError {
    AppError::config(ConfigError::InvalidValue {
        field,
        message: message.to_owned(),
    })
}
