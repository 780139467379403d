//! HTTP client for platform page and API requests

use crate::download::retry::{RetryConfig, RetryExecutor};
use crate::error::TubeError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Desktop browser user agent used for page requests
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

/// Source of raw HTML for a URL
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the body of `url` as text
    async fn fetch_page(&self, url: &str) -> Result<String, TubeError>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    async fn fetch_page(&self, url: &str) -> Result<String, TubeError> {
        (**self).fetch_page(url).await
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Retries for transient failures
    pub max_retries: u32,
    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            user_agent: None,
        }
    }
}

/// Shared HTTP client for the platform
#[derive(Debug, Clone)]
pub struct PlatformClient {
    client: Client,
    config: HttpClientConfig,
    retry: RetryExecutor,
}

impl PlatformClient {
    /// Build a client from configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, TubeError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()?;

        let retry = RetryExecutor::with_config(RetryConfig::with_max_retries(config.max_retries));

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Create a request with common browser headers
    pub fn create_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Accept", "*/*")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cache-Control", "no-cache")
    }

    /// Create a bare request for media downloads
    pub fn create_media_request(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header("Accept", "*/*")
            .header("Accept-Encoding", "identity")
    }

    /// POST a JSON body and decode the JSON answer, retrying transient failures
    pub async fn post_json<B, T>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &B,
    ) -> Result<T, TubeError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        self.retry
            .execute(move || async move {
                let mut request = self.create_request(Method::POST, url).json(body);
                for (name, value) in headers {
                    request = request.header(*name, *value);
                }
                let response = check_status(request.send().await?)?;
                Ok(response.json::<T>().await?)
            })
            .await
    }
}

#[async_trait]
impl PageSource for PlatformClient {
    async fn fetch_page(&self, url: &str) -> Result<String, TubeError> {
        debug!("Fetching page: {}", url);
        self.retry
            .execute(move || async move {
                let response = self.create_request(Method::GET, url).send().await?;
                let response = check_status(response)?;
                Ok(response.text().await?)
            })
            .await
    }
}

/// Map platform status codes onto domain errors
pub fn check_status(response: Response) -> Result<Response, TubeError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            warn!("Rate limited ({})", response.status());
            Err(TubeError::RateLimited)
        }
        StatusCode::NOT_FOUND => {
            warn!("Not found: {}", response.url());
            Err(TubeError::VideoUnavailable)
        }
        _ => Ok(response.error_for_status()?),
    }
}
