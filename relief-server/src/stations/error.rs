//! Transit-data API error types.

/// Errors that can occur when fetching a line from the transit-data API.
///
/// None of these reach the resolver's callers: every variant is retried and
/// then answered from the static catalog.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request did not complete within the client timeout
    #[error("request timed out")]
    Timeout,

    /// Consumer key rejected
    #[error("unauthorized: check ODPT_CONSUMER_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 2xx with nothing in the body
    #[error("empty response body")]
    EmptyBody,

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Client could not be built from its configuration
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StationError::Timeout
        } else {
            StationError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");
        assert_eq!(StationError::Timeout.to_string(), "request timed out");
        assert_eq!(StationError::EmptyBody.to_string(), "empty response body");

        let err = StationError::Json {
            message: "expected value".into(),
        };
        assert!(err.to_string().contains("expected value"));
    }
}
