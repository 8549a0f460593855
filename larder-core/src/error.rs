use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("URL not cached and offline mode is enabled: {0}")]
    NotCached(String),

    #[error("Daily request budget of {0} exhausted")]
    BudgetExhausted(u32),
}

/// Failure of a candidate source. None of these are fatal to a search.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Recipe API is not configured")]
    NotConfigured,

    #[error("Invalid API key")]
    InvalidCredential,

    #[error("API quota exceeded")]
    QuotaExceeded,

    #[error("API Error: {status}")]
    Upstream { status: u16 },

    #[error("Recipe API unreachable: {0}")]
    Unreachable(String),

    #[error("Unexpected API response: {0}")]
    InvalidResponse(String),
}

impl SourceError {
    /// Whether a user or operator can do something about this failure
    /// (rotate the key, wait for the quota to reset).
    pub fn is_actionable(&self) -> bool {
        matches!(self, SourceError::InvalidCredential | SourceError::QuotaExceeded)
    }
}

impl From<FetchError> for SourceError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::BudgetExhausted(_) => SourceError::QuotaExceeded,
            FetchError::RequestFailed(e) if e.is_timeout() => {
                SourceError::Unreachable("request timed out".to_string())
            }
            other => SourceError::Unreachable(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_credential_and_quota_are_actionable() {
        assert!(SourceError::InvalidCredential.is_actionable());
        assert!(SourceError::QuotaExceeded.is_actionable());
        assert!(!SourceError::NotConfigured.is_actionable());
        assert!(!SourceError::Upstream { status: 500 }.is_actionable());
        assert!(!SourceError::Unreachable("dns".to_string()).is_actionable());
    }

    #[test]
    fn test_fetch_errors_map_to_source_errors() {
        assert!(matches!(
            SourceError::from(FetchError::Timeout),
            SourceError::Unreachable(_)
        ));
        assert!(matches!(
            SourceError::from(FetchError::BudgetExhausted(150)),
            SourceError::QuotaExceeded
        ));
        assert!(matches!(
            SourceError::from(FetchError::NotCached("x".to_string())),
            SourceError::Unreachable(_)
        ));
    }
}
