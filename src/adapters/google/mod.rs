//! Google Workspace adapters. Gmail and Calendar over their REST APIs with an OAuth bearer token.

pub mod calendar;
pub mod gmail;
pub mod unconfigured;

pub use calendar::GoogleCalendarAdapter;
pub use gmail::GmailAdapter;
pub use unconfigured::Unconfigured;

use crate::domain::DomainError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

/// Authenticated HTTP session shared by the Google adapters.
///
/// Token acquisition and refresh happen outside the process; the token is
/// passed in as-is.
#[derive(Clone)]
pub struct GoogleSession {
    client: Arc<Client>,
    access_token: String,
}

impl GoogleSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            access_token: access_token.into(),
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).bearer_auth(&self.access_token)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url).bearer_auth(&self.access_token)
    }

    fn delete(&self, url: &str) -> RequestBuilder {
        self.client.delete(url).bearer_auth(&self.access_token)
    }
}

/// Send `request`, failing on transport errors and non-2xx statuses.
async fn send(
    request: RequestBuilder,
    map_err: fn(String) -> DomainError,
) -> Result<Response, DomainError> {
    let res = request
        .send()
        .await
        .map_err(|e| map_err(format!("Request failed: {}", e)))?;

    if !res.status().is_success() {
        let status = res.status();
        let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
        warn!(status = %status, "Google API returned error");
        return Err(map_err(format!(
            "Google API error {}: {}",
            status,
            text.chars().take(200).collect::<String>()
        )));
    }
    Ok(res)
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    map_err: fn(String) -> DomainError,
) -> Result<T, DomainError> {
    send(request, map_err)
        .await?
        .json()
        .await
        .map_err(|e| map_err(format!("Failed to parse response: {}", e)))
}
