//! Station and line types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::Coord;

/// Stable station identifier.
///
/// The static catalog numbers its stations; the remote transit API uses
/// opaque string identifiers. Both serialize as their natural JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StationId {
    Number(u64),
    Code(String),
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationId::Number(n) => write!(f, "{n}"),
            StationId::Code(code) => f.write_str(code),
        }
    }
}

impl From<u64> for StationId {
    fn from(n: u64) -> Self {
        StationId::Number(n)
    }
}

impl From<&str> for StationId {
    fn from(code: &str) -> Self {
        StationId::Code(code.to_string())
    }
}

/// A normalized line key.
///
/// Query values arrive raw from users, so keys are trimmed, stripped of
/// surrounding single and double quotes and lowercased before any
/// comparison. Quotes inside the key are kept.
///
/// # Examples
///
/// ```
/// use relief_server::domain::LineKey;
///
/// assert_eq!(LineKey::normalize(" YAMANOTE '"), LineKey::normalize("yamanote"));
/// assert_eq!(LineKey::normalize("\"Chuo\"").as_str(), "chuo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LineKey(String);

impl LineKey {
    /// Normalize a raw line key.
    pub fn normalize(raw: &str) -> Self {
        let unquoted = raw.trim().trim_matches(|c: char| c == '\'' || c == '"');
        LineKey(unquoted.trim().to_lowercase())
    }

    /// Returns the normalized key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for LineKey {
    fn from(raw: String) -> Self {
        LineKey::normalize(&raw)
    }
}

impl From<LineKey> for String {
    fn from(key: LineKey) -> Self {
        key.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station on a line.
///
/// Immutable once built, either from the static catalog or from a remote
/// transit API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub line: LineKey,
    pub lat: f64,
    pub lng: f64,
    /// Whether there is a toilet inside the ticket gates.
    #[serde(default)]
    pub has_toilet_inside: bool,
    /// Number of toilet stalls, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stalls: Option<u32>,
    /// Standard running time to the next station, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_time: Option<u32>,
}

impl Station {
    /// The station's position.
    pub fn coord(&self) -> Coord {
        Coord::unchecked(self.lat, self.lng)
    }

    /// Short description of toilet facilities, if any are known.
    pub fn toilet_info(&self) -> Option<String> {
        match (self.has_toilet_inside, self.stalls) {
            (true, Some(stalls)) => Some(format!(
                "Toilet inside the ticket gates ({stalls} stalls)"
            )),
            (true, None) => Some("Toilet inside the ticket gates".to_string()),
            (false, _) => None,
        }
    }
}

/// A transit line with its member stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub key: LineKey,
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub color: String,
    pub stations: Vec<Station>,
}
