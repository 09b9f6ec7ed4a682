//! Wikimedia Commons Client
//!
//! Resolves `File:` titles through the MediaWiki `imageinfo` API and
//! downloads the referenced binaries.
//!
//! # Features
//!
//! - Async HTTP communication with the Commons API
//! - Contactable `User-Agent` on every request
//! - Retry with exponential backoff on HTTP 403 and 429, honoring `Retry-After`
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use echolot_catalog::{CatalogSettings, CommonsClient};
//!
//! # async fn demo() -> Result<(), echolot_catalog::CatalogError> {
//! let client = CommonsClient::new(CatalogSettings::default())?;
//! let source = client.fetch_source("File:Leibniz_University_Hannover.jpg").await?;
//! # Ok(())
//! # }
//! ```

use crate::mapping::source_from_response;
use crate::{AssetCatalog, CatalogError};
use chrono::Utc;
use echolot_domain::SourceRecord;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default Commons API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://commons.wikimedia.org/w/api.php";

/// Default user agent, naming the project and where to reach its maintainers
pub const DEFAULT_USER_AGENT: &str = concat!(
    "echolot/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// Default timeout for requests (20 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff (1 second)
pub const DEFAULT_BACKOFF_MS: u64 = 1000;

/// Longest `Retry-After` delay honored
const MAX_RETRY_AFTER_SECS: u64 = 60;

const IMAGEINFO_PROPS: &str = "url|user|extmetadata|mime|size|timestamp";

/// Commons client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// API endpoint
    pub endpoint: String,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per request, including the first
    pub max_retries: u32,
    /// Base backoff delay in milliseconds
    pub backoff_ms: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }
}

/// Wikimedia Commons API client
pub struct CommonsClient {
    settings: CatalogSettings,
    client: reqwest::Client,
}

impl CommonsClient {
    /// Create a client from settings
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] if the user agent carries no
    /// contact (an email address or URL) or the HTTP client cannot be built.
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        if !is_contactable(&settings.user_agent) {
            return Err(CatalogError::Configuration(format!(
                "user agent '{}' must include a contact email or URL",
                settings.user_agent
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Configuration(e.to_string()))?;

        Ok(Self { settings, client })
    }

    /// Create a client with default settings and the given endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, CatalogError> {
        Self::new(CatalogSettings {
            endpoint: endpoint.into(),
            ..CatalogSettings::default()
        })
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.settings.max_retries = max_retries.max(1);
        self
    }

    /// The active settings
    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Resolve a title into a source record
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The title does not exist or is not a file
    /// - The response is not the expected `imageinfo` shape
    /// - The API keeps answering 403/429 after every attempt
    /// - Network communication fails
    pub async fn fetch_source(&self, title: &str) -> Result<SourceRecord, CatalogError> {
        if title.trim().is_empty() {
            return Err(CatalogError::TitleNotResolved {
                title: title.to_string(),
            });
        }

        let response = self
            .send_with_retry(title, || {
                self.client.get(&self.settings.endpoint).query(&[
                    ("action", "query"),
                    ("prop", "imageinfo"),
                    ("titles", title),
                    ("iiprop", IMAGEINFO_PROPS),
                    ("format", "json"),
                ])
            })
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Communication(format!(
                "HTTP {} resolving {}",
                status, title
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::MalformedUpstreamResponse {
                title: title.to_string(),
                detail: format!("Failed to parse response: {}", e),
            })?;

        let source = source_from_response(title, &body, Utc::now())?;
        info!("Resolved {} to {}", title, source.content_url.as_deref().unwrap_or("-"));
        Ok(source)
    }

    /// Download the binary at a content URL
    pub async fn download_asset(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let response = self.send_with_retry(url, || self.client.get(url)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::AssetUnavailable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Communication(format!("Download failed: {}", e)))?;
        info!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// Send a request, retrying on 403/429 and transport errors.
    ///
    /// Any other response, successful or not, is returned to the caller.
    async fn send_with_retry(
        &self,
        subject: &str,
        request: impl Fn() -> RequestBuilder,
    ) -> Result<Response, CatalogError> {
        let max_retries = self.settings.max_retries.max(1);
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < max_retries {
            attempts += 1;
            let delay = match request().send().await {
                Ok(response) if is_throttled(response.status()) => {
                    warn!(
                        "{} answered HTTP {} (attempt {}/{})",
                        subject,
                        response.status(),
                        attempts,
                        max_retries
                    );
                    last_error = Some(CatalogError::UpstreamRateLimited {
                        subject: subject.to_string(),
                        attempts,
                    });
                    retry_after(response.headers()).unwrap_or_else(|| self.backoff(attempts))
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!("Request for {} failed: {} (attempt {}/{})", subject, e, attempts, max_retries);
                    last_error = Some(CatalogError::Communication(format!("Request failed: {}", e)));
                    self.backoff(attempts)
                }
            };

            if attempts < max_retries {
                debug!("Retrying {} in {:?}", subject, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            CatalogError::Communication("Max retries exceeded".to_string())
        }))
    }

    /// Exponential backoff: base, 2x base, 4x base, ...
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.settings.backoff_ms.saturating_mul(factor))
    }
}

impl AssetCatalog for CommonsClient {
    async fn fetch_source(&self, title: &str) -> Result<SourceRecord, CatalogError> {
        CommonsClient::fetch_source(self, title).await
    }

    async fn download_asset(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        CommonsClient::download_asset(self, url).await
    }
}

fn is_throttled(status: StatusCode) -> bool {
    status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
}

/// `Retry-After` in seconds; HTTP-date values are ignored
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let seconds: u64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    Some(Duration::from_secs(seconds.min(MAX_RETRY_AFTER_SECS)))
}

/// Commons asks every client to name a way to contact its operator.
fn is_contactable(user_agent: &str) -> bool {
    let user_agent = user_agent.trim();
    !user_agent.is_empty() && (user_agent.contains('@') || user_agent.contains("http"))
}
