//! Embedded static catalog.
//!
//! The catalog is a JSON document compiled into the binary. Stations are
//! listed under their line, so line membership is assigned from the
//! enclosing line rather than repeated per station.

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::{Coord, InvalidCoord, Line, LineKey, Station, StationId};

/// The catalog shipped with the server.
pub const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Errors found while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line key {0:?} is empty after normalization")]
    EmptyLineKey(String),

    #[error("line {0} is declared more than once")]
    DuplicateLine(LineKey),

    #[error("station id {0} is used more than once")]
    DuplicateStationId(StationId),

    #[error("station {name}: {source}")]
    InvalidCoord {
        name: String,
        #[source]
        source: InvalidCoord,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogDto {
    lines: Vec<LineDto>,
}

#[derive(Debug, Deserialize)]
struct LineDto {
    key: String,
    name: String,
    color: String,
    stations: Vec<StationDto>,
}

#[derive(Debug, Deserialize)]
struct StationDto {
    id: StationId,
    name: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    has_toilet_inside: bool,
    stalls: Option<u32>,
    next_time: Option<u32>,
}

/// Parse and validate a catalog document.
pub fn parse_catalog(json: &str) -> Result<Vec<Line>, CatalogError> {
    let dto: CatalogDto = serde_json::from_str(json)?;
    build_lines(dto)
}

fn build_lines(dto: CatalogDto) -> Result<Vec<Line>, CatalogError> {
    let mut seen_lines = HashSet::new();
    let mut seen_ids = HashSet::new();
    let mut lines = Vec::with_capacity(dto.lines.len());

    for line in dto.lines {
        let key = LineKey::normalize(&line.key);
        if key.is_empty() {
            return Err(CatalogError::EmptyLineKey(line.key));
        }
        if !seen_lines.insert(key.clone()) {
            return Err(CatalogError::DuplicateLine(key));
        }

        let mut stations = Vec::with_capacity(line.stations.len());
        for s in line.stations {
            let coord = Coord::new(s.lat, s.lng).map_err(|source| CatalogError::InvalidCoord {
                name: s.name.clone(),
                source,
            })?;
            if !seen_ids.insert(s.id.clone()) {
                return Err(CatalogError::DuplicateStationId(s.id));
            }
            stations.push(Station {
                id: s.id,
                name: s.name,
                line: key.clone(),
                lat: coord.lat,
                lng: coord.lng,
                has_toilet_inside: s.has_toilet_inside,
                stalls: s.stalls,
                next_time: s.next_time,
            });
        }

        lines.push(Line {
            key,
            name: line.name,
            color: line.color,
            stations,
        });
    }

    Ok(lines)
}
