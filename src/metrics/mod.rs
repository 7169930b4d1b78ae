//! Result records, statistics aggregation, and per-request logging.
mod aggregate;
mod logging;
mod types;


pub use aggregate::aggregate;
pub use logging::{sample_log_channel, setup_sample_logger};
pub use types::{RunStats, Sample, TRANSPORT_FAILURE_STATUS};
