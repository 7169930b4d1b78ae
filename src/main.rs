mod args;
mod config;
mod dispatch;
mod entry;
mod error;
mod http;
mod metrics;
mod payload;
mod report;
mod shutdown;
mod system;

use std::process::ExitCode;

fn main() -> ExitCode {
    match entry::run() {
        Ok(exit_code) => exit_code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
