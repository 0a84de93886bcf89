//! Locally composed guidance, used whenever the generator cannot answer.

use super::context::GuidanceContext;
use super::reply::{Guidance, GuidanceSource};

/// Build a plan from the context alone.
pub fn fallback_guidance(ctx: &GuidanceContext) -> Guidance {
    let minutes = ctx.minutes();
    let target = &ctx.target.name;
    let mut steps = Vec::new();

    if ctx.is_same_station() {
        steps.push(format!("You are at {target}. Follow the toilet signs."));
    } else {
        if let Some(nearest) = &ctx.nearest {
            steps.push(format!("Go to {} station.", nearest.name));
        }
        steps.push(format!("Take the train to {target}."));
        steps.push(format!("At {target}, follow the toilet signs."));
    }

    let message = format!(
        "About {minutes} min to the toilet at {target}. Trains are {} right now.",
        ctx.congestion.description
    );

    Guidance {
        minutes,
        steps,
        toilet_info: ctx.toilet_info.clone(),
        message,
        congestion_emoji: Some(ctx.congestion.emoji.to_string()),
        congestion_level: Some(ctx.congestion.level),
        source: GuidanceSource::Fallback,
    }
}
