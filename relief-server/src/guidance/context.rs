//! Guidance request context.
//!
//! Assembles everything the guidance generator is told about a trip. Pure:
//! no network access, no clock reads.

use std::fmt::Write as _;

use serde::Serialize;

use crate::domain::eta::{transit_minutes, walking_minutes};
use crate::domain::{CongestionReading, Coord, EtaMode, Station};

/// Where the user wants to go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceTarget {
    pub name: String,
    pub coord: Coord,
}

/// Immutable input to the guidance generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceContext {
    pub origin: Coord,
    /// Station closest to the user, if any candidate existed.
    pub nearest: Option<Station>,
    pub nearest_distance_km: Option<f64>,
    pub target: GuidanceTarget,
    /// Origin to target.
    pub distance_km: f64,
    pub transit_minutes: u32,
    /// Only set when the user is already at the target station.
    pub walking_minutes: Option<u32>,
    /// Which estimate applies to this trip.
    pub mode: EtaMode,
    pub toilet_info: Option<String>,
    pub congestion: CongestionReading,
}

impl GuidanceContext {
    /// Assemble a context.
    ///
    /// `target_station` is the catalog entry for the target when one exists;
    /// it only contributes toilet information. When the nearest station is
    /// the target itself the trip is a walk inside the station and the
    /// walking model applies; otherwise the transit model does.
    pub fn build(
        origin: Coord,
        nearest: Option<(&Station, f64)>,
        target: GuidanceTarget,
        target_station: Option<&Station>,
        congestion: CongestionReading,
    ) -> Self {
        let distance_km = origin.distance_km(target.coord);
        let same_station = nearest.is_some_and(|(s, _)| s.name == target.name);

        let (mode, walking) = if same_station {
            (EtaMode::Walking, Some(walking_minutes(distance_km * 1000.0)))
        } else {
            (EtaMode::Transit, None)
        };

        Self {
            origin,
            nearest: nearest.map(|(s, _)| s.clone()),
            nearest_distance_km: nearest.map(|(_, d)| d),
            distance_km,
            transit_minutes: transit_minutes(distance_km),
            walking_minutes: walking,
            mode,
            toilet_info: target_station.and_then(Station::toilet_info),
            target,
            congestion,
        }
    }

    /// The estimate for the applicable mode.
    pub fn minutes(&self) -> u32 {
        match (self.mode, self.walking_minutes) {
            (EtaMode::Walking, Some(walking)) => walking,
            _ => self.transit_minutes,
        }
    }

    /// True if the user is already at the target station.
    pub fn is_same_station(&self) -> bool {
        self.mode == EtaMode::Walking
    }

    /// Render the user prompt for the generator.
    pub fn prompt(&self) -> String {
        let mut p = String::new();
        let _ = writeln!(p, "Current position: {}", self.origin);
        match &self.nearest {
            Some(s) => {
                let _ = writeln!(
                    p,
                    "Nearest station: {} ({:.2} km away)",
                    s.name,
                    self.nearest_distance_km.unwrap_or_default()
                );
            }
            None => {
                let _ = writeln!(p, "Nearest station: unknown");
            }
        }
        let _ = writeln!(p, "Destination station: {} at {}", self.target.name, self.target.coord);
        let _ = writeln!(p, "Straight-line distance: {:.2} km", self.distance_km);
        match self.mode {
            EtaMode::Walking => {
                let _ = writeln!(
                    p,
                    "The user is already at the destination station. Estimated walk: {} min",
                    self.minutes()
                );
            }
            EtaMode::Transit => {
                let _ = writeln!(p, "Estimated travel time by train: {} min", self.transit_minutes);
            }
        }
        if let Some(info) = &self.toilet_info {
            let _ = writeln!(p, "Toilet at destination: {info}");
        }
        let _ = writeln!(
            p,
            "Congestion at {:02}:00: level {}/10, {} {}",
            self.congestion.hour,
            self.congestion.level,
            self.congestion.description,
            self.congestion.emoji
        );
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StationDirectory;
    use crate::domain::classify;

    fn target(dir: &StationDirectory, name: &str) -> (GuidanceTarget, Station) {
        let s = dir.station_by_name(name).unwrap().clone();
        (
            GuidanceTarget {
                name: s.name.clone(),
                coord: s.coord(),
            },
            s,
        )
    }

    #[test]
    fn cross_station_uses_transit_model() {
        let dir = StationDirectory::embedded().unwrap();
        let tokyo = dir.station_by_name("東京").unwrap();
        let (t, shinbashi) = target(&dir, "新橋");
        let origin = Coord::unchecked(35.68, 139.76);

        let ctx = GuidanceContext::build(
            origin,
            Some((tokyo, origin.distance_km(tokyo.coord()))),
            t,
            Some(&shinbashi),
            classify(8),
        );

        assert_eq!(ctx.mode, EtaMode::Transit);
        assert!(ctx.walking_minutes.is_none());
        assert_eq!(ctx.minutes(), ctx.transit_minutes);
        assert!(ctx.transit_minutes >= 1);
        assert_eq!(ctx.nearest.as_ref().unwrap().name, "東京");
        assert_eq!(ctx.toilet_info.as_deref(), Some("Toilet inside the ticket gates (6 stalls)"));
        assert_eq!(ctx.congestion.level, 8);
    }

    #[test]
    fn same_station_uses_walking_model() {
        let dir = StationDirectory::embedded().unwrap();
        let (t, tokyo) = target(&dir, "東京");
        // ~100 m from the station's reference point
        let origin = Coord::unchecked(35.6821, 139.7671);

        let ctx = GuidanceContext::build(origin, Some((&tokyo, 0.1)), t, Some(&tokyo), classify(12));

        assert!(ctx.is_same_station());
        assert_eq!(ctx.walking_minutes, Some(1));
        assert_eq!(ctx.minutes(), 1);
    }

    #[test]
    fn no_nearest_station() {
        let target = GuidanceTarget {
            name: "新橋".to_string(),
            coord: Coord::unchecked(35.666427, 139.75835),
        };
        let ctx = GuidanceContext::build(
            Coord::unchecked(35.68, 139.76),
            None,
            target,
            None,
            classify(3),
        );

        assert_eq!(ctx.mode, EtaMode::Transit);
        assert!(ctx.nearest.is_none());
        assert!(ctx.toilet_info.is_none());
        assert!(ctx.prompt().contains("Nearest station: unknown"));
    }

    #[test]
    fn prompt_mentions_key_facts() {
        let dir = StationDirectory::embedded().unwrap();
        let (t, shinbashi) = target(&dir, "新橋");
        let origin = Coord::unchecked(35.68, 139.76);
        let ctx = GuidanceContext::build(origin, None, t, Some(&shinbashi), classify(17));

        let prompt = ctx.prompt();
        assert!(prompt.contains("新橋"));
        assert!(prompt.contains(&format!("{} min", ctx.transit_minutes)));
        assert!(prompt.contains("level 7/10, congested"));
        assert!(prompt.contains("6 stalls"));
    }
}
