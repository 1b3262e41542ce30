//! Shared HTTP plumbing for the provider clients.

use anyhow::{Context, Result};
use evroute_core::Lookup;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Default request timeout for every external call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Build the HTTP client shared by all providers.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("evroute/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Read a JSON body, turning a non-success status into an error.
pub(crate) async fn read_json(response: Response, what: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("{} request failed: {} {}", what, status, body));
    }

    response
        .json::<Value>()
        .await
        .with_context(|| format!("Failed to parse {} response", what))
}

/// Fold a fallible fetch into a [`Lookup`], logging transport failures.
pub(crate) fn into_lookup<T>(service: &str, result: Result<Option<T>>) -> Lookup<T> {
    match result {
        Ok(Some(value)) => Lookup::Found(value),
        Ok(None) => Lookup::NotFound,
        Err(err) => {
            tracing::warn!("{} unavailable: {:#}", service, err);
            Lookup::Unavailable(format!("{:#}", err))
        }
    }
}

/// Read a coordinate that may be encoded as a JSON number or a string.
pub(crate) fn as_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

pub(crate) fn trim_base_url(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}
