mod plan;

use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::VerifyArgs;
use crate::config;
use crate::error::AppResult;

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["loadcheck.toml", "loadcheck.json"];

/// Parses the CLI, merges config, and runs the verification.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration; verification
/// outcomes are reported through the exit code, not as errors.
pub(crate) fn run() -> AppResult<ExitCode> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(ExitCode::SUCCESS),
    };

    if let Some(config_file) = config::load_config(args.config.as_deref())? {
        config::apply_config(&mut args, &matches, &config_file)?;
    }

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(plan::run_verification(args))
}

fn parse_args() -> AppResult<Option<(VerifyArgs, ArgMatches)>> {
    let mut cmd = VerifyArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = VerifyArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
