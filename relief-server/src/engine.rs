//! Station resolution and arrival estimation.
//!
//! [`Engine`] ties the static directory, the remote line resolver, the
//! clock and the guidance generator together behind the operations the web
//! layer calls. It holds no mutable state; one instance is shared by every
//! request.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::directory::{StationDirectory, nearest, nearest_with_distance};
use crate::domain::eta::transit_minutes;
use crate::domain::{CongestionReading, Coord, Station, classify};
use crate::guidance::{
    ChatGuidanceClient, Guidance, GuidanceContext, GuidanceGenerator, GuidanceTarget,
    fallback_guidance,
};
use crate::stations::{
    CachedStationSource, LineResolver, ResolvedLine, StationClient, StationSource,
};

/// Outcome of a distance and arrival-time estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResult {
    /// User to target, great-circle.
    pub distance_km: f64,
    /// Transit-model estimate, at least one.
    pub minutes: u32,
    /// Station closest to the user, if the directory has any.
    pub nearest: Option<Station>,
    pub congestion: CongestionReading,
}

/// The station resolution and arrival estimation engine.
pub struct Engine<S = CachedStationSource<StationClient>, G = ChatGuidanceClient> {
    directory: Arc<StationDirectory>,
    resolver: LineResolver<S>,
    generator: Option<G>,
    clock: Arc<dyn Clock>,
}

impl<S: StationSource, G: GuidanceGenerator> Engine<S, G> {
    /// Create an engine.
    ///
    /// `generator` is `None` when no guidance API is configured; every plan
    /// is then composed locally.
    pub fn new(
        directory: Arc<StationDirectory>,
        resolver: LineResolver<S>,
        generator: Option<G>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            resolver,
            generator,
            clock,
        }
    }

    /// The static directory.
    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Stations of a line, live when possible. Never fails.
    pub async fn resolve_line(&self, raw_key: &str) -> Vec<Station> {
        self.resolver.resolve(raw_key).await
    }

    /// Like [`resolve_line`](Self::resolve_line), reporting the data origin.
    pub async fn resolve_line_detailed(&self, raw_key: &str) -> ResolvedLine {
        self.resolver.resolve_detailed(raw_key).await
    }

    /// Resolve every catalog line concurrently, in catalog order.
    pub async fn resolve_all_lines(&self) -> Vec<ResolvedLine> {
        let lookups = self
            .directory
            .lines()
            .iter()
            .map(|line| self.resolver.resolve_detailed(line.key.as_str()));
        join_all(lookups).await
    }

    /// Closest catalog station to `user`, skipping any named `exclude`.
    pub fn find_nearest(&self, user: Coord, exclude: Option<&str>) -> Option<&Station> {
        nearest(self.directory.all_stations(), user, exclude)
    }

    /// Closest station among a line's resolved stations (or the whole
    /// catalog when `line` is `None`), with its distance.
    pub async fn find_nearest_on_line(
        &self,
        user: Coord,
        exclude: Option<&str>,
        line: Option<&str>,
    ) -> Option<(Station, f64)> {
        match line {
            Some(raw_key) => {
                let stations = self.resolve_line(raw_key).await;
                nearest_with_distance(&stations, user, exclude).map(|(s, d)| (s.clone(), d))
            }
            None => nearest_with_distance(self.directory.all_stations(), user, exclude)
                .map(|(s, d)| (s.clone(), d)),
        }
    }

    /// Distance, transit estimate, nearest station and current congestion.
    ///
    /// Computed fresh on every call; the congestion reading always reflects
    /// the clock at call time.
    pub fn build_estimation(&self, user: Coord, target: Coord) -> EstimationResult {
        let distance_km = user.distance_km(target);
        let result = EstimationResult {
            distance_km,
            minutes: transit_minutes(distance_km),
            nearest: self.find_nearest(user, None).cloned(),
            congestion: self.current_congestion(),
        };
        debug!(
            %user,
            %target,
            distance_km,
            minutes = result.minutes,
            "built estimation"
        );
        result
    }

    /// Congestion for an explicit hour.
    pub fn classify_congestion(&self, hour: u8) -> CongestionReading {
        classify(hour)
    }

    /// Congestion for the clock's current hour.
    pub fn current_congestion(&self) -> CongestionReading {
        classify(self.clock.hour())
    }

    /// Gather the guidance context for a trip to `target`.
    ///
    /// The nearest station is searched on `line` when given (resolved live if
    /// possible), otherwise across the whole catalog.
    pub async fn guidance_context(
        &self,
        user: Coord,
        target: GuidanceTarget,
        line: Option<&str>,
    ) -> GuidanceContext {
        let nearest = self.find_nearest_on_line(user, None, line).await;
        let target_station = self.directory.station_by_name(&target.name);

        GuidanceContext::build(
            user,
            nearest.as_ref().map(|(s, d)| (s, *d)),
            target,
            target_station,
            self.current_congestion(),
        )
    }

    /// Produce a plan for `ctx`, generated when possible, local otherwise.
    pub async fn plan_guidance(&self, ctx: &GuidanceContext) -> Guidance {
        let Some(generator) = &self.generator else {
            return fallback_guidance(ctx);
        };

        match generator.generate(ctx).await {
            Ok(guidance) => guidance,
            Err(e) => {
                warn!(error = %e, target = %ctx.target.name, "guidance generation failed, using local plan");
                fallback_guidance(ctx)
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
