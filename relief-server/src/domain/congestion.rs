//! Time-of-day congestion classification.
//!
//! Congestion is a pure function of the local hour. The hour is always
//! supplied by the caller (see [`crate::clock::Clock`]) so classification
//! never reads the wall clock itself.

use serde::Serialize;

/// Level used for hours not covered by any range in [`CONGESTION_TABLE`].
pub const QUIET_LEVEL: u8 = 2;

/// Half-open hour ranges `[start, end)` and their congestion level.
///
/// Checked in declaration order; the first match wins.
pub const CONGESTION_TABLE: &[(u8, u8, u8)] = &[
    (7, 9, 8),   // morning rush
    (9, 11, 6),
    (11, 14, 3), // midday
    (14, 16, 4),
    (16, 19, 7), // evening rush
    (19, 21, 5),
];

/// Severity bucket derived from a congestion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    VeryCongested,
    Congested,
    SomewhatCongested,
    RelativelyQuiet,
}

impl Severity {
    /// Bucket a 0–10 level.
    pub fn from_level(level: u8) -> Self {
        match level {
            8.. => Severity::VeryCongested,
            6..=7 => Severity::Congested,
            4..=5 => Severity::SomewhatCongested,
            _ => Severity::RelativelyQuiet,
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Severity::VeryCongested => "very congested",
            Severity::Congested => "congested",
            Severity::SomewhatCongested => "somewhat congested",
            Severity::RelativelyQuiet => "relatively quiet",
        }
    }

    /// Emoji tag shown next to the description.
    pub fn emoji(self) -> &'static str {
        match self {
            Severity::VeryCongested => "🔴",
            Severity::Congested => "🟠",
            Severity::SomewhatCongested => "🟡",
            Severity::RelativelyQuiet => "🟢",
        }
    }
}

/// Congestion at a given hour. Recomputed per request, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CongestionReading {
    /// 0–10 severity score.
    pub level: u8,
    pub description: &'static str,
    pub emoji: &'static str,
    pub severity: Severity,
    /// Hour of day the reading was taken for (0–23).
    pub hour: u8,
}

/// Level for an hour, without the severity decoration.
pub fn level_for_hour(hour: u8) -> u8 {
    CONGESTION_TABLE
        .iter()
        .find(|(start, end, _)| (*start..*end).contains(&hour))
        .map(|(_, _, level)| *level)
        .unwrap_or(QUIET_LEVEL)
}

/// Classify the congestion for an hour of day.
///
/// Hours of 24 and above wrap around (`25` is treated as `1`).
///
/// ```
/// use relief_server::domain::congestion::classify;
///
/// let reading = classify(8);
/// assert_eq!(reading.level, 8);
/// assert_eq!(reading.description, "very congested");
/// ```
pub fn classify(hour: u8) -> CongestionReading {
    let hour = hour % 24;
    let level = level_for_hour(hour);
    let severity = Severity::from_level(level);

    CongestionReading {
        level,
        description: severity.description(),
        emoji: severity.emoji(),
        severity,
        hour,
    }
}
