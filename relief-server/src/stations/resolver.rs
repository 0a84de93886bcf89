//! Line resolution: live transit data first, static catalog on failure.
//!
//! Resolution never fails. The remote feed is asked at most
//! [`DEFAULT_MAX_ATTEMPTS`] times; an empty list or any error (network,
//! timeout, any non-2xx status, bad JSON) counts as a failed attempt. When
//! the line has no remote mapping, no consumer key is configured, or every
//! attempt failed, the static catalog's stations for the line are returned.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::directory::StationDirectory;
use crate::domain::{LineKey, Station};

use super::convert::convert_stations;
use super::source::StationSource;

/// Attempts made against the remote feed before falling back.
pub const DEFAULT_MAX_ATTEMPTS: usize = 2;

/// Mapping from catalog line keys to remote railway identifiers.
pub fn default_line_ids() -> HashMap<LineKey, String> {
    [
        ("yamanote", "odpt.Railway:JR-East.Yamanote"),
        ("chuo", "odpt.Railway:JR-East.ChuoRapid"),
    ]
    .into_iter()
    .map(|(key, id)| (LineKey::normalize(key), id.to_string()))
    .collect()
}

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Catalog line key → remote railway id.
    pub line_ids: HashMap<LineKey, String>,
    /// Maximum fetch attempts per resolution.
    pub max_attempts: usize,
}

impl ResolverConfig {
    /// Set the attempt ceiling (at least one).
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    /// Add or replace a line mapping.
    pub fn with_line(mut self, key: &str, remote_id: impl Into<String>) -> Self {
        self.line_ids.insert(LineKey::normalize(key), remote_id.into());
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            line_ids: default_line_ids(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Why the static catalog answered instead of the remote feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The line has no remote identifier.
    UnmappedLine,
    /// No consumer key configured.
    NoCredential,
    /// Every attempt failed or came back empty.
    Exhausted { attempts: usize, last_error: String },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::UnmappedLine => f.write_str("line has no remote mapping"),
            FallbackReason::NoCredential => f.write_str("no consumer key configured"),
            FallbackReason::Exhausted {
                attempts,
                last_error,
            } => write!(f, "{attempts} attempts failed, last: {last_error}"),
        }
    }
}

/// Where a resolved station list came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum LineOrigin {
    Remote { attempts: usize },
    Static(FallbackReason),
}

/// A resolved line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLine {
    pub key: LineKey,
    pub origin: LineOrigin,
    pub stations: Vec<Station>,
}

/// Resolves a line's stations, preferring live data.
///
/// `source` is `None` when no consumer key is configured.
pub struct LineResolver<S> {
    directory: Arc<StationDirectory>,
    source: Option<S>,
    config: ResolverConfig,
}

impl<S: StationSource> LineResolver<S> {
    /// Create a resolver.
    pub fn new(directory: Arc<StationDirectory>, source: Option<S>, config: ResolverConfig) -> Self {
        Self {
            directory,
            source,
            config,
        }
    }

    /// The static directory used for fallback.
    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Resolve a raw line key to its stations. Never fails.
    pub async fn resolve(&self, raw_key: &str) -> Vec<Station> {
        self.resolve_detailed(raw_key).await.stations
    }

    /// Resolve a raw line key, reporting where the stations came from.
    pub async fn resolve_detailed(&self, raw_key: &str) -> ResolvedLine {
        let key = LineKey::normalize(raw_key);

        let Some(remote_id) = self.config.line_ids.get(&key) else {
            debug!(line = %key, "no remote mapping, using static catalog");
            return self.fallback(key, FallbackReason::UnmappedLine);
        };

        let Some(source) = &self.source else {
            debug!(line = %key, "no consumer key, using static catalog");
            return self.fallback(key, FallbackReason::NoCredential);
        };

        let catalog = self.directory.stations_by_line(key.as_str());
        let mut last_error = String::new();

        for attempt in 1..=self.config.max_attempts {
            match source.fetch_line(remote_id).await {
                Ok(dtos) => {
                    let stations = convert_stations(dtos, &key, catalog);
                    if !stations.is_empty() {
                        info!(line = %key, attempt, count = stations.len(), "resolved line from remote feed");
                        return ResolvedLine {
                            key,
                            origin: LineOrigin::Remote { attempts: attempt },
                            stations,
                        };
                    }
                    warn!(line = %key, attempt, "remote feed returned no usable stations");
                    last_error = "no usable stations in response".to_string();
                }
                Err(e) => {
                    warn!(line = %key, attempt, error = %e, "remote station fetch failed");
                    last_error = e.to_string();
                }
            }
        }

        self.fallback(
            key,
            FallbackReason::Exhausted {
                attempts: self.config.max_attempts,
                last_error,
            },
        )
    }

    fn fallback(&self, key: LineKey, reason: FallbackReason) -> ResolvedLine {
        let stations = self.directory.stations_by_line(key.as_str()).to_vec();
        if let FallbackReason::Exhausted { .. } = reason {
            warn!(line = %key, %reason, "falling back to static catalog");
        }
        ResolvedLine {
            key,
            origin: LineOrigin::Static(reason),
            stations,
        }
    }
}
