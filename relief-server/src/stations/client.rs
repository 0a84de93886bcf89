//! Transit-data API client (ODPT station feed).

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::StationError;
use super::source::StationSource;

/// Default endpoint for the station feed.
const DEFAULT_BASE_URL: &str = "https://api.odpt.org/api/v4/odpt:Station";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One station as returned by the transit-data API.
///
/// Field names follow the remote schema. Everything but the identifier is
/// optional because the feed omits fields for some entries.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationDto {
    #[serde(rename = "owl:sameAs")]
    pub same_as: String,
    #[serde(rename = "dc:title", default)]
    pub title: Option<String>,
    #[serde(rename = "geo:lat", default)]
    pub lat: Option<f64>,
    #[serde(rename = "geo:long", default)]
    pub long: Option<f64>,
}

/// Configuration for the transit-data API client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Consumer key sent as the `consumerKey` query parameter
    pub consumer_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a new config with the given consumer key.
    pub fn new(consumer_key: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the transit-data station feed.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
    consumer_key: String,
}

impl StationClient {
    /// Create a new client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        if config.consumer_key.trim().is_empty() {
            return Err(StationError::Config("consumer key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            consumer_key: config.consumer_key,
        })
    }

    /// Fetch the stations of one line, identified by the remote line id.
    pub async fn fetch_line(&self, remote_line: &str) -> Result<Vec<StationDto>, StationError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("line", remote_line),
                ("consumerKey", self.consumer_key.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StationError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        parse_stations(&body)
    }
}

impl StationSource for StationClient {
    fn fetch_line(
        &self,
        remote_line: &str,
    ) -> impl Future<Output = Result<Vec<StationDto>, StationError>> + Send {
        StationClient::fetch_line(self, remote_line)
    }
}

/// Parse a station feed body.
pub(crate) fn parse_stations(body: &str) -> Result<Vec<StationDto>, StationError> {
    if body.trim().is_empty() {
        return Err(StationError::EmptyBody);
    }

    serde_json::from_str(body).map_err(|e| StationError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StationClientConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_builder() {
        let config = StationClientConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(2);
        assert_eq!(config.consumer_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 2);
    }

    #[test]
    fn client_requires_key() {
        assert!(StationClient::new(StationClientConfig::new("  ")).is_err());
        assert!(StationClient::new(StationClientConfig::new("key")).is_ok());
    }

    #[test]
    fn parse_remote_fields() {
        let body = r#"[
            {
                "owl:sameAs": "odpt.Station:JR-East.Yamanote.Tokyo",
                "dc:title": "東京",
                "geo:lat": 35.681236,
                "geo:long": 139.767125,
                "odpt:railway": "odpt.Railway:JR-East.Yamanote"
            },
            {
                "owl:sameAs": "odpt.Station:JR-East.Yamanote.Unknown"
            }
        ]"#;
        let stations = parse_stations(body).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].title.as_deref(), Some("東京"));
        assert_eq!(stations[0].long, Some(139.767125));
        assert!(stations[1].lat.is_none());
    }

    #[test]
    fn empty_body_is_an_error() {
        assert!(matches!(parse_stations(""), Err(StationError::EmptyBody)));
        assert!(matches!(parse_stations("  \n"), Err(StationError::EmptyBody)));
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            parse_stations("{\"error\": true}"),
            Err(StationError::Json { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        let config = StationClientConfig::new("key")
            .with_base_url("http://127.0.0.1:9/stations")
            .with_timeout(2);
        let client = StationClient::new(config).unwrap();
        assert!(client.fetch_line("odpt.Railway:JR-East.Yamanote").await.is_err());
    }
}
