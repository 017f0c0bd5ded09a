//! Shared error types for the application

use serde::Serialize;
use thiserror::Error;

/// Main error type for aeoscope operations
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected before any analyzer runs (bad URL, empty query list)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The page source could not retrieve or parse the page
    #[error("Failed to fetch {url}: {message}")]
    UpstreamFetch { url: String, message: String },

    /// The document handed to an analyzer violates its invariants
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an upstream fetch error for a URL
    pub fn upstream(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamFetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Add context to an error, keeping its variant
    pub fn with_context(self, context: impl Into<String>) -> Self {
        let context = context.into();
        let prefix = |message: String| format!("{context}: {message}");
        match self {
            Self::InvalidInput(m) => Self::InvalidInput(prefix(m)),
            Self::UpstreamFetch { url, message } => Self::UpstreamFetch {
                url,
                message: prefix(message),
            },
            Self::MalformedDocument(m) => Self::MalformedDocument(prefix(m)),
            Self::Configuration(m) => Self::Configuration(prefix(m)),
        }
    }

    /// Whether the caller can fix the problem by changing the request
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::Configuration(_) | Self::MalformedDocument(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

/// A metric that could not be computed for one document.
///
/// Extractors record these instead of failing; analyzers substitute the
/// worst-case value for the affected sub-score and emit a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricFailure {
    pub metric: String,
    pub message: String,
}

impl MetricFailure {
    pub fn new(metric: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_prefixes_message() {
        let result: Result<()> = Err(Error::invalid_input("queries must not be empty"));
        let err = result.context("query match").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: query match: queries must not be empty"
        );
    }

    #[test]
    fn test_context_keeps_variant() {
        let result: Result<()> = Err(Error::MalformedDocument("heading level 9".into()));
        let err = result.context("full audit").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
        assert!(err.is_user_fixable());

        let err = Error::upstream("https://a.test", "timeout").with_context("load");
        assert!(matches!(err, Error::UpstreamFetch { ref url, .. } if url == "https://a.test"));
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_user_fixable_classification() {
        assert!(Error::invalid_input("x").is_user_fixable());
        assert!(!Error::upstream("https://a.test", "timeout").is_user_fixable());
    }
}
