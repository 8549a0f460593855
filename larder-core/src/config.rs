//! Configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::http::{CachingClient, CachingClientBuilder, DiskCache};

/// Default recipe API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Default number of selected ingredients allowed.
pub const DEFAULT_MAX_INGREDIENTS: usize = 5;

/// Default number of recipe candidates requested from the API.
pub const DEFAULT_REMOTE_CANDIDATES: usize = 12;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default delay between API requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 250;

/// Free-tier daily request allowance.
pub const DEFAULT_DAILY_BUDGET: u32 = 150;

/// Default debounce window for selection changes in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}

/// Deployment profile controlling how many results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Narrow layouts: top 3 results.
    Compact,
    /// Full grid: top 9 results.
    Full,
}

impl Profile {
    pub fn max_results(self) -> usize {
        match self {
            Profile::Compact => 3,
            Profile::Full => 9,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct LarderConfig {
    /// Recipe API key. None leaves the API unconfigured.
    pub api_key: Option<String>,
    /// Base URL for the recipe API.
    pub base_url: String,
    pub profile: Profile,
    /// Maximum ranked results returned by a search.
    pub max_results: usize,
    /// Maximum number of selected ingredients.
    pub max_ingredients: usize,
    /// Number of candidates requested from the API per search.
    pub remote_candidates: usize,
    pub request_timeout: Duration,
    pub rate_limit_ms: u64,
    /// Requests allowed per UTC day. 0 means unlimited.
    pub daily_budget: u32,
    pub debounce: Duration,
    /// Where favorites and the theme preference are stored.
    pub data_dir: PathBuf,
    /// HTTP response cache directory. None disables caching.
    pub http_cache_dir: Option<PathBuf>,
    /// If true, only serve cached API responses.
    pub offline: bool,
}

impl Default for LarderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: Profile::Full,
            max_results: Profile::Full.max_results(),
            max_ingredients: DEFAULT_MAX_INGREDIENTS,
            remote_candidates: DEFAULT_REMOTE_CANDIDATES,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            daily_budget: DEFAULT_DAILY_BUDGET,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            data_dir: Self::default_data_dir(),
            http_cache_dir: Some(DiskCache::default_dir()),
            offline: false,
        }
    }
}

impl LarderConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `SPOONACULAR_API_KEY`: API key; unset leaves the API unconfigured
    /// - `LARDER_API_BASE_URL`: API base URL (default: "https://api.spoonacular.com")
    /// - `LARDER_PROFILE`: "full" (9 results, default) or "compact" (3 results)
    /// - `LARDER_MAX_RESULTS`: Overrides the profile's result cap
    /// - `LARDER_MAX_INGREDIENTS`: Selection cap (default: 5)
    /// - `LARDER_REMOTE_CANDIDATES`: Candidates requested from the API (default: 12)
    /// - `LARDER_REQUEST_TIMEOUT_SECS`: Request timeout (default: 10)
    /// - `LARDER_RATE_LIMIT_MS`: Delay between API requests (default: 250)
    /// - `LARDER_DAILY_REQUEST_BUDGET`: Requests per day, 0 for unlimited (default: 150)
    /// - `LARDER_DEBOUNCE_MS`: Selection debounce window (default: 300)
    /// - `LARDER_DATA_DIR`: Storage directory (default: "~/.larder")
    /// - `LARDER_HTTP_CACHE`: "none", "disk" (default) or a path
    /// - `LARDER_OFFLINE`: Serve cached API responses only (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let api_key = lookup("SPOONACULAR_API_KEY").filter(|k| !k.trim().is_empty());

        let base_url = lookup("LARDER_API_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let profile = match lookup("LARDER_PROFILE") {
            Some(val) if val.trim().eq_ignore_ascii_case("compact") => Profile::Compact,
            _ => Profile::Full,
        };

        let max_results = number("LARDER_MAX_RESULTS")
            .map(|n| n as usize)
            .unwrap_or_else(|| profile.max_results());
        if max_results == 0 {
            return Err(ConfigError::InvalidValue {
                var: "LARDER_MAX_RESULTS".to_string(),
                value: "0".to_string(),
            });
        }

        let max_ingredients = number("LARDER_MAX_INGREDIENTS")
            .map(|n| n as usize)
            .unwrap_or(defaults.max_ingredients);
        if max_ingredients == 0 {
            return Err(ConfigError::InvalidValue {
                var: "LARDER_MAX_INGREDIENTS".to_string(),
                value: "0".to_string(),
            });
        }

        let data_dir = lookup("LARDER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let http_cache_dir = match lookup("LARDER_HTTP_CACHE") {
            Some(val) if val == "none" => None,
            Some(val) if val == "disk" => Some(DiskCache::default_dir()),
            Some(path) => Some(PathBuf::from(path)),
            None => defaults.http_cache_dir,
        };

        let offline = lookup("LARDER_OFFLINE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            api_key,
            base_url,
            profile,
            max_results,
            max_ingredients,
            remote_candidates: number("LARDER_REMOTE_CANDIDATES")
                .map(|n| n as usize)
                .unwrap_or(defaults.remote_candidates),
            request_timeout: number("LARDER_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            rate_limit_ms: number("LARDER_RATE_LIMIT_MS").unwrap_or(defaults.rate_limit_ms),
            daily_budget: number("LARDER_DAILY_REQUEST_BUDGET")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.daily_budget),
            debounce: number("LARDER_DEBOUNCE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            data_dir,
            http_cache_dir,
            offline,
        })
    }

    /// Get the default data directory: ~/.larder
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".larder"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Whether an API key is present.
    pub fn is_remote_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// A CachingClient builder carrying these settings.
    pub fn http_client_builder(&self) -> CachingClientBuilder {
        CachingClient::builder()
            .cache_dir(self.http_cache_dir.clone())
            .offline(self.offline)
            .timeout(self.request_timeout)
            .rate_limit_ms(self.rate_limit_ms)
            .daily_budget((self.daily_budget > 0).then_some(self.daily_budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<LarderConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LarderConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.api_key.is_none());
        assert!(!config.is_remote_configured());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_results, 9);
        assert_eq!(config.max_ingredients, 5);
        assert_eq!(config.debounce, Duration::from_millis(300));
    }

    #[test]
    fn test_blank_api_key_is_unconfigured() {
        let config = load(&[("SPOONACULAR_API_KEY", "   ")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_compact_profile_and_override() {
        let config = load(&[("LARDER_PROFILE", "compact")]).unwrap();
        assert_eq!(config.max_results, 3);

        let config = load(&[("LARDER_PROFILE", "compact"), ("LARDER_MAX_RESULTS", "5")]).unwrap();
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn test_unparseable_numbers_use_defaults() {
        let config = load(&[("LARDER_RATE_LIMIT_MS", "fast")]).unwrap();
        assert_eq!(config.rate_limit_ms, DEFAULT_RATE_LIMIT_MS);
    }

    #[test]
    fn test_profile_is_case_insensitive() {
        for value in ["Compact", "COMPACT", " compact "] {
            let config = load(&[("LARDER_PROFILE", value)]).unwrap();
            assert_eq!(config.profile, Profile::Compact, "{:?}", value);
            assert_eq!(config.max_results, 3);
        }
    }

    #[test]
    fn test_out_of_range_budget_uses_default() {
        let config = load(&[("LARDER_DAILY_REQUEST_BUDGET", "4294967296")]).unwrap();
        assert_eq!(config.daily_budget, DEFAULT_DAILY_BUDGET);

        let config = load(&[("LARDER_DAILY_REQUEST_BUDGET", "500")]).unwrap();
        assert_eq!(config.daily_budget, 500);
    }

    #[test]
    fn test_zero_caps_are_rejected() {
        assert!(load(&[("LARDER_MAX_RESULTS", "0")]).is_err());
        assert!(load(&[("LARDER_MAX_INGREDIENTS", "0")]).is_err());
    }

    #[test]
    fn test_cache_and_base_url() {
        let config = load(&[
            ("LARDER_HTTP_CACHE", "none"),
            ("LARDER_API_BASE_URL", "http://localhost:8080/"),
        ])
        .unwrap();
        assert!(config.http_cache_dir.is_none());
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
