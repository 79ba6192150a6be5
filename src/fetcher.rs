use reqwest::{header, Client, ClientBuilder};
use std::time::Duration;

use crate::error::{AppError, Result};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A received upstream response. Status interpretation is left to the caller.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    pub status_line: String,
    pub content_type: String,
    pub body: String,
}

impl FetchedResponse {
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}

/// HTTP client wrapper with a per-attempt timeout and a bounded fixed-delay retry.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Fetcher {
            client,
            max_attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        })
    }

    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// GETs `url`, retrying on any transport failure. Dropping the returned
    /// future abandons the in-flight attempt and any pending retry.
    pub async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        let mut attempt = 1;
        loop {
            match self.try_fetch(url).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.max_attempts => {
                    tracing::warn!(url, attempt, error = %e, "fetch attempt failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(AppError::Network(e.to_string())),
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> std::result::Result<FetchedResponse, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        Ok(FetchedResponse {
            status: status.as_u16(),
            status_line: status.to_string(),
            content_type,
            body,
        })
    }
}
