use reqwest::Client;
use url::Url;

use crate::args::{DEFAULT_USER_AGENT, VerifyArgs};
use crate::error::{AppError, AppResult, ValidationError};

/// Validates the configured target URL and returns its normalized form.
///
/// # Errors
///
/// Returns an error when the URL is missing, unparseable, or has no host.
pub fn resolve_target_url(args: &VerifyArgs) -> AppResult<String> {
    let raw = args
        .url
        .as_deref()
        .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
    let parsed = Url::parse(raw).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    if parsed.host_str().is_none() {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(parsed.into())
}

/// Builds the HTTP client shared read-only by every in-flight unit.
///
/// # Errors
///
/// Returns an error when the client cannot be constructed.
pub fn build_client(args: &VerifyArgs) -> AppResult<Client> {
    Client::builder()
        .timeout(args.request_timeout)
        .connect_timeout(args.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(AppError::from)
}
