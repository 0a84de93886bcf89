//! Guidance generator error types.

/// Errors from the guidance generator.
///
/// Callers never surface these; any of them triggers the locally composed
/// plan instead.
#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    /// No API key configured
    #[error("guidance generator not configured")]
    NotConfigured,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request did not complete within the client timeout
    #[error("request timed out")]
    Timeout,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The completion had no content
    #[error("empty reply")]
    EmptyReply,

    /// Reply was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Reply parsed but broke the contract
    #[error("invalid reply: {0}")]
    Invalid(&'static str),
}

impl From<reqwest::Error> for GuidanceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GuidanceError::Timeout
        } else {
            GuidanceError::Http(err)
        }
    }
}
