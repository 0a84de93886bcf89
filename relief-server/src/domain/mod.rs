//! Domain types for station resolution and arrival estimation.
//!
//! Everything here is pure: no I/O, no clock reads. Coordinates are validated
//! at construction when built through [`Coord::new`]; the distance and ETA
//! functions themselves propagate NaN rather than trapping it.

pub mod congestion;
pub mod eta;
mod geo;
mod station;

pub use congestion::{CongestionReading, Severity, classify};
pub use eta::EtaMode;
pub use geo::{Coord, EARTH_RADIUS_KM, InvalidCoord, distance_km};
pub use station::{Line, LineKey, Station, StationId};
