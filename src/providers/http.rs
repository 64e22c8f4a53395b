//! Shared HTTP plumbing for the live providers: client construction,
//! status classification and transport error mapping.

use crate::error::{RecipeError, RejectionReason};
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a client whose every request is bounded by `timeout`
pub fn build_client(timeout: Duration) -> Result<Client, RecipeError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RecipeError::ConfigFailure(format!("Failed to create HTTP client: {}", e)))
}

/// `base` with `segments` appended, each one percent-encoded
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, RecipeError> {
    let mut url = Url::parse(base)
        .map_err(|e| RecipeError::ConfigFailure(format!("Invalid base URL '{}': {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| RecipeError::ConfigFailure(format!("Invalid base URL '{}'", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Map a transport-level failure onto the error taxonomy
pub fn classify_transport(err: reqwest::Error) -> RecipeError {
    warn!("Request failed: {}", err);
    if err.is_timeout() {
        RecipeError::TransientNetwork("Request timed out".to_string())
    } else if err.is_decode() {
        RecipeError::rejected(
            RejectionReason::MalformedResponse,
            format!("Could not decode API response: {}", err),
        )
    } else if err.is_builder() {
        RecipeError::ConfigFailure(format!("Error setting up API request: {}", err))
    } else {
        RecipeError::TransientNetwork("No response received from the API server".to_string())
    }
}

/// Map a non-success status code onto the error taxonomy
pub fn classify_status(status: StatusCode) -> RecipeError {
    warn!("API responded with status {}", status);
    match status.as_u16() {
        401 | 403 => RecipeError::ConfigFailure(
            "Invalid API credentials - please check your configuration".to_string(),
        ),
        404 => RecipeError::rejected(RejectionReason::EndpointNotFound, "API endpoint not found"),
        429 => RecipeError::rejected(
            RejectionReason::RateLimited,
            "API rate limit exceeded - please try again later",
        ),
        code => RecipeError::rejected(
            RejectionReason::UnexpectedStatus(code),
            format!("API request failed with status {}", code),
        ),
    }
}

/// Decode a successful response body as JSON, classifying everything else
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RecipeError> {
    let status = response.status();
    debug!("API response status: {}", status);
    if !status.is_success() {
        return Err(classify_status(status));
    }

    let body = response.text().await.map_err(classify_transport)?;
    serde_json::from_str(&body).map_err(|e| {
        warn!("Malformed API response: {}", e);
        RecipeError::rejected(
            RejectionReason::MalformedResponse,
            format!("Could not decode API response: {}", e),
        )
    })
}

/// Copy of `url` for logging, with the values of the named query parameters masked
pub fn redact(url: &Url, names: &[&str]) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if names.contains(&name.as_ref()) {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(&pairs);
    masked.to_string()
}
