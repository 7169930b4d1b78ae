use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use crate::args::{DEFAULT_PROBE_BODY, VerifyArgs};
use crate::dispatch;
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{self, RequestUnit};
use crate::metrics;
use crate::payload;
use crate::report::{self, VerdictPolicy};
use crate::shutdown;

pub(super) async fn run_verification(args: VerifyArgs) -> AppResult<ExitCode> {
    let url = http::resolve_target_url(&args)?;
    // clap rejects the CLI combination; a config file can still produce it.
    if args.payload_size.is_some() && args.data != DEFAULT_PROBE_BODY {
        return Err(AppError::validation(ValidationError::PayloadSizeWithData));
    }
    let client = http::build_client(&args)?;

    let (shutdown_tx, _shutdown_rx) = shutdown::shutdown_channel();
    let signal_handle = shutdown::setup_signal_shutdown_handler(&shutdown_tx);

    let (log_tx, log_handle) = match args.log_file.as_deref() {
        Some(path) => {
            let (tx, rx) = metrics::sample_log_channel();
            let handle = metrics::setup_sample_logger(PathBuf::from(path), rx);
            (Some(tx), Some(handle))
        }
        None => (None, None),
    };

    let units = build_units(&args);
    info!(
        "Dispatching {} requests against {} ({} in flight max)",
        units.len(),
        url,
        args.concurrency.get()
    );

    let execute = {
        let client = client.clone();
        let url: Arc<str> = Arc::from(url.as_str());
        let log_tx = log_tx.clone();
        let expected_status = args.expected_status;
        let expect_json = args.expect_json;
        move |unit: RequestUnit| {
            let client = client.clone();
            let url = Arc::clone(&url);
            let log_tx = log_tx.clone();
            async move {
                let sample =
                    http::execute_unit(&client, &url, &unit, expected_status, expect_json).await;
                // Diagnostics only; never stall the run on log backpressure.
                if let Some(log_tx) = log_tx.as_ref() {
                    drop(log_tx.try_send(sample));
                }
                sample
            }
        }
    };

    let dispatch_report =
        dispatch::run_bounded(units, args.concurrency.get(), &shutdown_tx, execute).await;

    drop(log_tx);
    if let Some(handle) = log_handle
        && let Err(err) = handle.await?
    {
        warn!("Per-request log incomplete: {}", err);
    }
    signal_handle.abort();

    let stats = metrics::aggregate(&dispatch_report.samples);
    let policy = VerdictPolicy {
        threshold_pct: args.threshold,
        require_zero_failures: args.strict,
    };
    let verdict = report::evaluate(&stats, &policy, dispatch_report.interrupted);
    report::print_summary(&stats, verdict);

    Ok(verdict.exit_code())
}

fn build_units(args: &VerifyArgs) -> Vec<RequestUnit> {
    let total = args.requests.get();
    let mut rng = rand::thread_rng();
    let mut units = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    for id in 1..=total {
        let body = match args.payload_size.as_ref() {
            Some(range) => {
                let target = rng.gen_range(range.min()..=range.max());
                let value = payload::synthesize(usize::try_from(target).unwrap_or(usize::MAX));
                serde_json::to_string(&value).unwrap_or_else(|_| DEFAULT_PROBE_BODY.to_owned())
            }
            None => args.data.clone(),
        };
        units.push(RequestUnit {
            id,
            body: Arc::new(body),
        });
    }
    units
}
