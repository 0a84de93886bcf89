//! Remote station lookup with static fallback.
//!
//! Fetches a line's stations from the ODPT transit-data API, normalizes them
//! into domain stations, and falls back to the static catalog whenever the
//! feed cannot be used.

mod cache;
mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod resolver;
mod source;

pub use cache::{CachedStationSource, StationCacheConfig};
pub use client::{StationClient, StationClientConfig, StationDto};
pub use convert::convert_stations;
pub use error::StationError;
pub use resolver::{
    DEFAULT_MAX_ATTEMPTS, FallbackReason, LineOrigin, LineResolver, ResolvedLine, ResolverConfig,
    default_line_ids,
};
pub use source::StationSource;
