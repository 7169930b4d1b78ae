use std::sync::Arc;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::time::Instant;
use tracing::debug;

use crate::metrics::Sample;

/// One planned request execution, identified by sequence number.
#[derive(Debug, Clone)]
pub struct RequestUnit {
    pub id: u64,
    pub body: Arc<String>,
}

/// Performs exactly one POST round trip and folds the outcome into a
/// [`Sample`].
///
/// Every call path yields a sample: transport failures (connect refused,
/// timeout, reset) become `status_code: None`, and a received response is
/// classified against `expected_status` plus, when `expect_json` is set, a
/// syntactically valid JSON body. Nothing escapes this boundary.
pub async fn execute_unit(
    client: &Client,
    url: &str,
    unit: &RequestUnit,
    expected_status: u16,
    expect_json: bool,
) -> Sample {
    let start = Instant::now();
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(unit.body.as_str().to_owned())
        .send()
        .await;

    match response {
        Ok(response) => {
            let status = response.status().as_u16();
            // Drain the body so elapsed time covers the full round trip and
            // the connection can be reused.
            let body = response.bytes().await;
            let elapsed = start.elapsed();
            let success = match body {
                Ok(bytes) => {
                    status == expected_status
                        && (!expect_json
                            || serde_json::from_slice::<serde_json::Value>(&bytes).is_ok())
                }
                Err(err) => {
                    debug!("Request {}: failed to read response body: {}", unit.id, err);
                    false
                }
            };
            Sample {
                id: unit.id,
                elapsed,
                status_code: Some(status),
                success,
            }
        }
        Err(err) => {
            let elapsed = start.elapsed();
            debug!("Request {} failed: {}", unit.id, err);
            Sample {
                id: unit.id,
                elapsed,
                status_code: None,
                success: false,
            }
        }
    }
}
