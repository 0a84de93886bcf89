//! Static station directory.
//!
//! The directory is built once at start-up from the embedded catalog and
//! shared read-only between requests. Lookups are linear scans; the catalog
//! holds tens of entries.

mod catalog;
mod nearest;

pub use catalog::{CatalogError, EMBEDDED_CATALOG, parse_catalog};
pub use nearest::{nearest, nearest_with_distance};

use crate::domain::{Line, LineKey, Station, StationId};

/// In-memory catalog of lines and their stations.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    lines: Vec<Line>,
}

impl StationDirectory {
    /// Load the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            lines: parse_catalog(json)?,
        })
    }

    /// Build a directory from already-validated lines.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Every station, in catalog order (line by line).
    pub fn all_stations(&self) -> impl Iterator<Item = &Station> {
        self.lines.iter().flat_map(|l| l.stations.iter())
    }

    /// Number of stations across all lines.
    pub fn len(&self) -> usize {
        self.lines.iter().map(|l| l.stations.len()).sum()
    }

    /// True if the catalog has no stations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All lines in catalog order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Look up a line by a raw (unsanitized) key.
    pub fn line(&self, raw_key: &str) -> Option<&Line> {
        self.line_by_key(&LineKey::normalize(raw_key))
    }

    /// Look up a line by an already-normalized key.
    pub fn line_by_key(&self, key: &LineKey) -> Option<&Line> {
        self.lines.iter().find(|l| &l.key == key)
    }

    /// Stations on a line. Empty if the key is unknown.
    pub fn stations_by_line(&self, raw_key: &str) -> &[Station] {
        self.line(raw_key)
            .map(|l| l.stations.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a station by id.
    pub fn station_by_id(&self, id: &StationId) -> Option<&Station> {
        self.all_stations().find(|s| &s.id == id)
    }

    /// Look up a station by exact display name.
    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.all_stations().find(|s| s.name == name)
    }
}
