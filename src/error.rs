use thiserror::Error;

/// Error type shared across the pipeline
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (permanent failures)
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // I/O errors (potentially transient)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors (usually permanent)
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // Network errors (transient - should retry)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded by search API")]
    RateLimited,

    // Client errors (permanent - don't retry)
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    // Geometry construction errors
    #[error("Geometry error: {0}")]
    Geometry(String),
}

/// Error categorization for retry strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Permanent errors - should not retry
    Permanent,
    /// Transient errors - safe to retry
    Transient,
    /// Rate limited - retry with backoff
    RateLimited,
}

impl Error {
    /// Categorize error for retry logic
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_)
            | Error::InvalidInput { .. }
            | Error::Geometry(_)
            | Error::Serde(_) => ErrorCategory::Permanent,

            Error::RateLimited => ErrorCategory::RateLimited,

            Error::Http(_) | Error::Io(_) => ErrorCategory::Transient,

            Error::Api { status, .. } => match *status {
                429 => ErrorCategory::RateLimited,
                // 4xx client errors are permanent
                400..=499 => ErrorCategory::Permanent,
                // 5xx server errors are transient
                _ => ErrorCategory::Transient,
            },
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Transient | ErrorCategory::RateLimited
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_permanent() {
        let err = Error::InvalidInput {
            field: "query".to_string(),
            reason: "empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Permanent);
        assert!(!err.is_retryable());
    }

    #[test]
    fn api_status_drives_category() {
        let server = Error::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(server.category(), ErrorCategory::Transient);
        assert!(server.is_retryable());

        let client = Error::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(client.category(), ErrorCategory::Permanent);

        let throttled = Error::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(throttled.category(), ErrorCategory::RateLimited);
        assert!(throttled.is_retryable());
    }

    #[test]
    fn display_formats_field_and_reason() {
        let err = Error::InvalidInput {
            field: "period".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(format!("{err}"), "Invalid input: period - must be positive");
    }
}
