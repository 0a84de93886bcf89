//! Arrival-time estimation.
//!
//! Two models are provided:
//!
//! - [`transit_minutes`] for cross-station trips. Assumes an average speed of
//!   20 km/h plus five minutes for walking to the platform and changing.
//! - [`walking_minutes`] for short walks inside or right next to the station
//!   the user is already at.
//!
//! Both are floored at one minute. Negative or NaN distances also yield the
//! floor.

use serde::Serialize;

/// Average door-to-door speed for transit trips.
pub const TRANSIT_SPEED_KMH: f64 = 20.0;

/// Fixed allowance for reaching the platform and transfers.
pub const TRANSIT_OVERHEAD_MINS: u32 = 5;

/// Walking pace.
pub const WALK_SPEED_M_PER_MIN: f64 = 80.0;

/// Which model produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaMode {
    Transit,
    Walking,
}

/// Minutes to cover `distance_km` by transit.
///
/// ```
/// use relief_server::domain::eta::transit_minutes;
///
/// assert_eq!(transit_minutes(0.0), 5);
/// assert_eq!(transit_minutes(10.0), 35);
/// ```
pub fn transit_minutes(distance_km: f64) -> u32 {
    let riding = (distance_km / TRANSIT_SPEED_KMH * 60.0).round();
    floor_minutes(riding, TRANSIT_OVERHEAD_MINS)
}

/// Minutes to walk `distance_m` metres.
pub fn walking_minutes(distance_m: f64) -> u32 {
    let walking = (distance_m / WALK_SPEED_M_PER_MIN).round();
    floor_minutes(walking, 0)
}

/// Estimate for a distance under the given mode.
pub fn estimate(mode: EtaMode, distance_km: f64) -> u32 {
    match mode {
        EtaMode::Transit => transit_minutes(distance_km),
        EtaMode::Walking => walking_minutes(distance_km * 1000.0),
    }
}

fn floor_minutes(raw: f64, overhead: u32) -> u32 {
    // NaN fails this comparison too
    let raw = if raw > 0.0 { raw.min(u32::MAX as f64) as u32 } else { 0 };
    raw.saturating_add(overhead).max(1)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn transit_never_below_one(km in 0.0f64..25_000.0) {
            prop_assert!(transit_minutes(km) >= 1);
        }

        #[test]
        fn transit_is_monotone(a in 0.0f64..1_000.0, b in 0.0f64..1_000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(transit_minutes(lo) <= transit_minutes(hi));
        }

        #[test]
        fn walking_never_below_one(m in 0.0f64..100_000.0) {
            prop_assert!(walking_minutes(m) >= 1);
        }
    }
}
