//! HTTP endpoints on the device.
//!
//! Failures here are recoverable by design: the dashboard logs them and
//! keeps showing the last good state. No retry, no user-visible error.

use gloo_net::http::Request;
use thiserror::Error;

use scale_common::{BrowserTimeReport, Reading};

/// localStorage key overriding the endpoint base, for running the client
/// against a device on another host.
const API_BASE_KEY: &str = "scale_api_base";

/// Recoverable failures from the device endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Parse(String),
}

/// Endpoint base. Same-origin by default, overridable via localStorage.
pub fn api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten());

    match stored {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => String::new(),
    }
}

pub fn readings_url() -> String {
    format!("{}/readings", api_base())
}

pub fn events_url() -> String {
    format!("{}/events", api_base())
}

pub fn browsertime_url() -> String {
    format!("{}/browsertime", api_base())
}

/// One-shot read of the current sensor state.
pub async fn fetch_reading() -> Result<Reading, ApiError> {
    let response = Request::get(&readings_url())
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if response.status() != 200 {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json::<Reading>()
        .await
        .map_err(|err| ApiError::Parse(err.to_string()))
}

/// POST the browser clock to the device. The response body is ignored.
pub async fn report_browser_time(report: &BrowserTimeReport) -> Result<(), ApiError> {
    let response = Request::post(&browsertime_url())
        .json(report)
        .map_err(|err| ApiError::Parse(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    Ok(())
}
