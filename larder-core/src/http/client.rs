//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::FetchError;

use super::cache::DiskCache;
use super::rate_limiter::RateLimiter;
use super::redact_api_key;

/// A response as seen by the API adapter. Non-success statuses are returned,
/// not raised, so callers decide what each status means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Configuration for CachingClient.
#[derive(Clone)]
pub struct CachingClientBuilder {
    cache_dir: Option<PathBuf>,
    cache_ttl: chrono::Duration,
    rate_limit_ms: u64,
    daily_budget: Option<u32>,
    offline: bool,
    timeout: Duration,
    user_agent: String,
}

impl Default for CachingClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CachingClientBuilder {
    /// Create a new builder with default settings: no disk cache, 250ms
    /// between requests, 150 requests per day, 10 second timeout.
    pub fn new() -> Self {
        Self {
            cache_dir: None,
            cache_ttl: chrono::Duration::hours(24),
            rate_limit_ms: 250,
            daily_budget: Some(150),
            offline: false,
            timeout: Duration::from_secs(10),
            user_agent: concat!("larder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the cache directory. None disables caching.
    pub fn cache_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cache_dir = dir;
        self
    }

    /// Set how long cached responses stay valid.
    pub fn cache_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the delay between requests in milliseconds. 0 disables pacing.
    pub fn rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    /// Set the number of requests allowed per UTC day. None means unlimited.
    pub fn daily_budget(mut self, budget: Option<u32>) -> Self {
        self.daily_budget = budget;
        self
    }

    /// When true, only cached responses are served.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Build the CachingClient.
    pub fn build(self) -> Result<CachingClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        let cache = self
            .cache_dir
            .map(|dir| DiskCache::new(dir, self.cache_ttl));
        let rate_limiter = RateLimiter::new(
            Duration::from_millis(self.rate_limit_ms),
            self.daily_budget,
        );

        Ok(CachingClient {
            inner,
            cache,
            rate_limiter,
            offline: self.offline,
        })
    }
}

/// Production HTTP client with response caching and request pacing.
pub struct CachingClient {
    inner: reqwest::Client,
    cache: Option<DiskCache>,
    rate_limiter: RateLimiter,
    offline: bool,
}

impl CachingClient {
    /// Create a new CachingClient with default configuration.
    pub fn new() -> Result<Self, reqwest::Error> {
        CachingClientBuilder::new().build()
    }

    /// Get a builder for custom configuration.
    pub fn builder() -> CachingClientBuilder {
        CachingClientBuilder::new()
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> Option<super::cache::CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Clear the cache.
    pub fn clear_cache(&self) -> std::io::Result<()> {
        if let Some(cache) = &self.cache {
            cache.clear()?;
        }
        Ok(())
    }

    /// Requests sent to the network so far today.
    pub async fn requests_today(&self) -> u32 {
        self.rate_limiter.used_today().await
    }
}

#[async_trait]
impl HttpClient for CachingClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        let redacted = redact_api_key(url);

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(url)) {
            tracing::debug!(url = %redacted, "cache hit");
            return Ok(HttpResponse::ok(cached.body));
        }

        if self.offline {
            tracing::debug!(url = %redacted, "cache miss (offline mode)");
            return Err(FetchError::NotCached(redacted));
        }

        self.rate_limiter.acquire().await?;

        tracing::debug!(url = %redacted, "network: fetching");
        let response = self.inner.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestFailed(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let response = HttpResponse { status, body };

        if response.is_success() {
            tracing::debug!(url = %redacted, status, "network: fetched successfully");
            if let Some(cache) = &self.cache {
                if let Err(e) = cache.put(url, &response.body) {
                    tracing::warn!("Failed to cache API response: {}", e);
                }
            }
        } else {
            tracing::debug!(url = %redacted, status, "network: request failed");
        }

        Ok(response)
    }
}

/// Mock response for testing.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// A 200 response with this body.
    Json(String),
    /// An empty response with this status code.
    Status(u16),
    /// A connection-level failure.
    NetworkError(String),
    Timeout,
}

/// Mock HTTP client for testing.
///
/// Responses are matched by checking whether the requested URL contains a
/// registered substring. The first registration that matches wins.
pub struct MockClient {
    responses: Vec<(String, MockResponse, Duration)>,
    requests: Mutex<Vec<String>>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add a response for URLs containing `url_contains`.
    pub fn with_response(mut self, url_contains: &str, response: MockResponse) -> Self {
        self.responses
            .push((url_contains.to_string(), response, Duration::ZERO));
        self
    }

    /// Add a response that arrives after `latency`.
    pub fn with_delayed_response(
        mut self,
        url_contains: &str,
        response: MockResponse,
        latency: Duration,
    ) -> Self {
        self.responses
            .push((url_contains.to_string(), response, latency));
        self
    }

    /// Add a 200 JSON response for URLs containing `url_contains`.
    pub fn with_json(self, url_contains: &str, json: &str) -> Self {
        self.with_response(url_contains, MockResponse::Json(json.to_string()))
    }

    /// Add a bare status response for URLs containing `url_contains`.
    pub fn with_status(self, url_contains: &str, status: u16) -> Self {
        self.with_response(url_contains, MockResponse::Status(status))
    }

    /// Every URL requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requests.lock().await.push(url.to_string());

        let Some((_, response, latency)) = self
            .responses
            .iter()
            .find(|(pattern, _, _)| url.contains(pattern.as_str()))
        else {
            return Err(FetchError::Network(format!(
                "No mock response for URL: {}",
                redact_api_key(url)
            )));
        };

        if !latency.is_zero() {
            tokio::time::sleep(*latency).await;
        }

        match response {
            MockResponse::Json(body) => Ok(HttpResponse::ok(body.clone())),
            MockResponse::Status(status) => Ok(HttpResponse {
                status: *status,
                body: String::new(),
            }),
            MockResponse::NetworkError(e) => Err(FetchError::Network(e.clone())),
            MockResponse::Timeout => Err(FetchError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_matches_first_registered_substring() {
        let client = MockClient::new()
            .with_json("query=egg", r#"{"results":[]}"#)
            .with_status("query=", 500);

        let egg = client.get("https://x/search?query=egg").await.unwrap();
        assert_eq!(egg.status, 200);

        let other = client.get("https://x/search?query=ham").await.unwrap();
        assert_eq!(other.status, 500);
        assert!(!other.is_success());

        assert_eq!(client.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_unmatched_is_network_error() {
        let client = MockClient::new();
        let err = client.get("https://x/none").await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_offline_client_without_cache_entry() {
        let dir = tempfile::TempDir::new().unwrap();
        let client = CachingClient::builder()
            .cache_dir(Some(dir.path().to_path_buf()))
            .offline(true)
            .build()
            .unwrap();

        let err = client
            .get("https://api.example.com/recipes?apiKey=k")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotCached(_)));
        assert_eq!(client.requests_today().await, 0);
    }

    #[tokio::test]
    async fn test_cached_response_served_without_network() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = "https://api.example.com/recipes?apiKey=k&ingredients=egg";
        DiskCache::new(dir.path().to_path_buf(), chrono::Duration::hours(1))
            .put(url, "[]")
            .unwrap();

        let client = CachingClient::builder()
            .cache_dir(Some(dir.path().to_path_buf()))
            .offline(true)
            .build()
            .unwrap();

        let response = client.get(url).await.unwrap();
        assert_eq!(response, HttpResponse::ok("[]"));
    }
}
