//! Disk-based cache of successful API responses.
//!
//! Spoonacular's free tier is metered per request, so repeated lookups for the
//! same ingredient list are served from disk until they expire.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

use super::redact_api_key;

/// Disk-based HTTP response cache.
pub struct DiskCache {
    cache_dir: PathBuf,
    max_age: Duration,
}

/// Metadata stored alongside cached responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Request URL with the API key redacted.
    pub url: String,
    pub fetched_at: DateTime<Utc>,
}

/// A cached successful response.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: String,
    pub metadata: CacheMetadata,
}

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub fresh: usize,
    pub expired: usize,
}

impl DiskCache {
    /// Create a new DiskCache with the given directory and entry lifetime.
    pub fn new(cache_dir: PathBuf, max_age: Duration) -> Self {
        Self { cache_dir, max_age }
    }

    /// Get the default cache directory: ~/.larder/http-cache
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".larder").join("http-cache"))
            .unwrap_or_else(|| PathBuf::from("data/http-cache"))
    }

    /// Directory for a URL, named by its SHA-256 so keys never reach the filesystem.
    fn entry_dir(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let digest: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        self.cache_dir.join(&digest[..2]).join(digest)
    }

    fn is_fresh(&self, metadata: &CacheMetadata) -> bool {
        Utc::now() - metadata.fetched_at < self.max_age
    }

    /// Get a cached response if it exists and has not expired.
    pub fn get(&self, url: &str) -> Option<CachedResponse> {
        let dir = self.entry_dir(url);
        let body_path = dir.join("response.json");
        let metadata_path = dir.join("metadata.json");

        if !(body_path.exists() && metadata_path.exists()) {
            return None;
        }

        let metadata_str = fs::read_to_string(&metadata_path).ok()?;
        let metadata: CacheMetadata = serde_json::from_str(&metadata_str).ok()?;
        if !self.is_fresh(&metadata) {
            tracing::debug!(url = %metadata.url, "cache entry expired");
            return None;
        }

        let body = fs::read_to_string(&body_path).ok()?;
        Some(CachedResponse { body, metadata })
    }

    /// Save a successful response body.
    pub fn put(&self, url: &str, body: &str) -> std::io::Result<()> {
        let dir = self.entry_dir(url);
        fs::create_dir_all(&dir)?;

        let metadata = CacheMetadata {
            url: redact_api_key(url),
            fetched_at: Utc::now(),
        };
        let metadata_json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(dir.join("response.json"), body)?;
        fs::write(dir.join("metadata.json"), metadata_json)?;
        Ok(())
    }

    /// Count fresh and expired entries.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();

        let Ok(shards) = fs::read_dir(&self.cache_dir) else {
            return stats;
        };

        for shard in shards.filter_map(|e| e.ok()) {
            let Ok(entries) = fs::read_dir(shard.path()) else {
                continue;
            };
            for entry in entries.filter_map(|e| e.ok()) {
                let metadata = fs::read_to_string(entry.path().join("metadata.json"))
                    .ok()
                    .and_then(|s| serde_json::from_str::<CacheMetadata>(&s).ok());
                match metadata {
                    Some(m) if self.is_fresh(&m) => stats.fresh += 1,
                    Some(_) => stats.expired += 1,
                    None => {}
                }
            }
        }

        stats
    }

    /// Clear all cached responses.
    pub fn clear(&self) -> std::io::Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}
