//! Caching layer for remote station lists.
//!
//! Station lists change rarely, so successful fetches are kept for a short
//! TTL and shared between concurrent requests. Only non-empty lists are
//! cached; failures always go back to the API so the resolver's retry logic
//! sees them. Nothing time-of-day dependent passes through here.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::client::StationDto;
use super::error::StationError;
use super::source::StationSource;

/// Cached station list.
type LineEntry = Arc<Vec<StationDto>>;

/// Configuration for the station cache.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached lines.
    pub max_capacity: u64,
}

impl StationCacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 64,
        }
    }
}

/// Station source with caching.
///
/// Wraps any [`StationSource`] and caches its successful responses, keyed by
/// remote line id.
pub struct CachedStationSource<S> {
    inner: S,
    lines: MokaCache<String, LineEntry>,
}

impl<S: StationSource> CachedStationSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &StationCacheConfig) -> Self {
        let lines = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, lines }
    }

    /// Access the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached lines.
    pub fn entry_count(&self) -> u64 {
        self.lines.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.lines.invalidate_all();
    }

    async fn fetch_cached(&self, remote_line: &str) -> Result<Vec<StationDto>, StationError> {
        if let Some(cached) = self.lines.get(remote_line).await {
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.fetch_line(remote_line).await?;

        if !stations.is_empty() {
            self.lines
                .insert(remote_line.to_string(), Arc::new(stations.clone()))
                .await;
        }

        Ok(stations)
    }
}

impl<S: StationSource> StationSource for CachedStationSource<S> {
    fn fetch_line(
        &self,
        remote_line: &str,
    ) -> impl Future<Output = Result<Vec<StationDto>, StationError>> + Send {
        self.fetch_cached(remote_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::mock::{MockReply, MockStationSource};

    fn shinjuku() -> StationDto {
        StationDto {
            same_as: "odpt.Station:JR-East.Yamanote.Shinjuku".to_string(),
            title: Some("新宿".to_string()),
            lat: Some(35.690921),
            long: Some(139.700258),
        }
    }

    #[test]
    fn default_config() {
        let config = StationCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 64);
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let cached = CachedStationSource::new(
            MockStationSource::always(vec![shinjuku()], 5),
            &StationCacheConfig::default(),
        );

        let first = cached.fetch_line("L").await.unwrap();
        let second = cached.fetch_line("L").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn lines_are_cached_separately() {
        let cached = CachedStationSource::new(
            MockStationSource::always(vec![shinjuku()], 5),
            &StationCacheConfig::default(),
        );

        cached.fetch_line("A").await.unwrap();
        cached.fetch_line("B").await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn failures_and_empty_lists_are_not_cached() {
        let cached = CachedStationSource::new(
            MockStationSource::new([
                MockReply::Timeout,
                MockReply::Stations(Vec::new()),
                MockReply::Stations(vec![shinjuku()]),
            ]),
            &StationCacheConfig::default(),
        );

        assert!(cached.fetch_line("L").await.is_err());
        assert!(cached.fetch_line("L").await.unwrap().is_empty());
        assert_eq!(cached.fetch_line("L").await.unwrap().len(), 1);
        assert_eq!(cached.inner().calls(), 3);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedStationSource::new(
            MockStationSource::always(vec![shinjuku()], 5),
            &StationCacheConfig::default(),
        );

        cached.fetch_line("L").await.unwrap();
        cached.invalidate_all();
        cached.fetch_line("L").await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }
}
