//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coord, Line, Station};
use crate::guidance::{Guidance, GuidanceContext};
use crate::stations::ResolvedLine;

/// Service status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// A catalog line without its stations.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    /// Normalized line key
    pub key: String,

    /// Display name
    pub name: String,

    /// Display color (`#RRGGBB`)
    pub color: String,

    /// Number of catalog stations on the line
    pub station_count: usize,
}

impl LineSummary {
    pub fn from_line(line: &Line) -> Self {
        Self {
            key: line.key.as_str().to_string(),
            name: line.name.clone(),
            color: line.color.clone(),
            station_count: line.stations.len(),
        }
    }
}

/// Response listing catalog lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineSummary>,
}

/// Query for stations.
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    /// Line key; every line when absent
    pub line: Option<String>,
}

/// Resolved stations, one entry per requested line.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub lines: Vec<ResolvedLine>,
}

/// Request for the nearest station.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    pub lat: f64,
    pub lng: f64,

    /// Station name to skip
    pub exclude: Option<String>,

    /// Restrict the search to this line's resolved stations
    pub line: Option<String>,
}

/// Nearest station.
///
/// The station's fields sit at the top level next to `distance_km`. When
/// there is no station the body is `{"distance_km": null}`.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    #[serde(flatten)]
    pub station: Option<Station>,
    pub distance_km: Option<f64>,
}

impl NearestResponse {
    pub fn from_nearest(nearest: Option<(Station, f64)>) -> Self {
        match nearest {
            Some((station, distance_km)) => Self {
                station: Some(station),
                distance_km: Some(distance_km),
            },
            None => Self {
                station: None,
                distance_km: None,
            },
        }
    }
}

/// Request for a distance and arrival estimate.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub lat: f64,
    pub lng: f64,
    pub target_lat: f64,
    pub target_lng: f64,
}

/// Query for a congestion reading.
#[derive(Debug, Deserialize)]
pub struct CongestionQuery {
    /// Hour 0-23; the current hour when absent
    pub hour: Option<u8>,
}

/// Request for guidance to a target station.
#[derive(Debug, Deserialize)]
pub struct GuidanceRequest {
    pub lat: f64,
    pub lng: f64,

    /// Target station name
    pub target_name: String,

    /// Target position; looked up in the catalog by name when absent
    pub target_lat: Option<f64>,
    pub target_lng: Option<f64>,

    /// Line to search for the nearest station
    pub line: Option<String>,
}

impl GuidanceRequest {
    /// Explicit target coordinates, if both halves are present.
    pub fn target_coord(&self) -> Option<Result<Coord, crate::domain::InvalidCoord>> {
        match (self.target_lat, self.target_lng) {
            (Some(lat), Some(lng)) => Some(Coord::new(lat, lng)),
            _ => None,
        }
    }
}

/// Guidance plan with the facts it was built from.
#[derive(Debug, Serialize)]
pub struct GuidanceResponse {
    pub guidance: Guidance,
    pub context: GuidanceContext,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
