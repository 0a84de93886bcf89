//! Guidance replies and their JSON contract.

use serde::{Deserialize, Serialize};

use super::error::GuidanceError;

/// Who produced a guidance reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceSource {
    Generated,
    Fallback,
}

/// An arrival plan ready to show the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guidance {
    pub minutes: u32,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toilet_info: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion_level: Option<u8>,
    pub source: GuidanceSource,
}

/// Reply shape the generator is asked to produce.
#[derive(Debug, Deserialize)]
struct RawReply {
    minutes: f64,
    #[serde(default)]
    steps: Option<Vec<String>>,
    #[serde(default)]
    toilet_info: Option<String>,
    message: String,
    #[serde(default)]
    congestion_emoji: Option<String>,
    #[serde(default)]
    congestion_level: Option<f64>,
}

/// Parse a generator reply.
///
/// Markdown code fences around the JSON are tolerated. `message` must be
/// non-empty and `minutes` a finite, non-negative number.
pub fn parse_reply(text: &str) -> Result<Guidance, GuidanceError> {
    let json = strip_fences(text);
    if json.is_empty() {
        return Err(GuidanceError::EmptyReply);
    }

    let raw: RawReply = serde_json::from_str(json).map_err(|e| GuidanceError::Json {
        message: e.to_string(),
    })?;

    if raw.message.trim().is_empty() {
        return Err(GuidanceError::Invalid("message is empty"));
    }
    if !raw.minutes.is_finite() || raw.minutes < 0.0 {
        return Err(GuidanceError::Invalid("minutes must be a non-negative number"));
    }

    Ok(Guidance {
        minutes: (raw.minutes.round() as u32).max(1),
        steps: raw.steps.unwrap_or_default(),
        toilet_info: raw.toilet_info.filter(|s| !s.trim().is_empty()),
        message: raw.message.trim().to_string(),
        congestion_emoji: raw.congestion_emoji,
        congestion_level: raw
            .congestion_level
            .filter(|l| l.is_finite())
            .map(|l| l.round().clamp(0.0, 10.0) as u8),
        source: GuidanceSource::Generated,
    })
}

fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop an optional language tag on the opening fence
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
