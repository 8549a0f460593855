//! HTTP transport for the recipe API, with caching and request pacing.
//!
//! All outgoing requests go through an [`HttpClient`] so that the adapter can
//! be exercised against [`MockClient`] in tests.

mod cache;
mod client;
mod rate_limiter;

pub use cache::{CacheMetadata, CacheStats, CachedResponse, DiskCache};
pub use client::{
    CachingClient, CachingClientBuilder, HttpClient, HttpResponse, MockClient, MockResponse,
};
pub use rate_limiter::RateLimiter;

/// Query parameter carrying the API key. Never written to disk.
pub const API_KEY_PARAM: &str = "apiKey";

/// Replace the API key in a URL so it can be logged or stored.
pub fn redact_api_key(url: &str) -> String {
    let mut parsed = match url::Url::parse(url) {
        Ok(p) => p,
        Err(_) => return url.to_string(),
    };

    if !parsed.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            if k == API_KEY_PARAM {
                (k.into_owned(), "REDACTED".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_api_key() {
        let url = "https://api.example.com/food/ingredients/search?apiKey=secret&query=egg";
        let redacted = redact_api_key(url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("apiKey=REDACTED"));
        assert!(redacted.contains("query=egg"));
    }

    #[test]
    fn test_redact_without_key_is_unchanged() {
        let url = "https://api.example.com/recipes?number=3";
        assert_eq!(redact_api_key(url), url);
        assert_eq!(redact_api_key("not a url"), "not a url");
    }
}
