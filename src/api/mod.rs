use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use self::error::{ApiError, ApiResult};

pub mod catalog;
pub mod error;
pub mod gemini;
pub mod types;
pub mod youtube;

/// Longest error body kept in `ApiError::Status`.
const MAX_ERROR_BODY: usize = 200;

pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(concat!("moodwave/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Sends a request and decodes a JSON body, mapping every failure onto `ApiError`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> ApiResult<T> {
    let response = request
        .send()
        .await
        .map_err(|source| ApiError::Http { service, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ApiError::Http { service, source })?;

    if !status.is_success() {
        let body: String = body.chars().take(MAX_ERROR_BODY).collect();
        return Err(ApiError::Status { service, status, body });
    }

    serde_json::from_str(&body).map_err(|source| ApiError::Decode { service, source })
}
