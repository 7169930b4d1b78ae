//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::VerifyArgs;
pub use types::{ByteRange, PositiveU64, PositiveUsize};

pub(crate) use defaults::{DEFAULT_PROBE_BODY, DEFAULT_USER_AGENT};
