//! Natural-language arrival plans.
//!
//! [`GuidanceContext`] gathers the trip facts, a [`GuidanceGenerator`] turns
//! them into a plan, and [`fallback_guidance`] composes one locally whenever
//! the generator is unavailable or misbehaves.

mod client;
mod context;
mod error;
mod fallback;
mod reply;

pub use client::{ChatGuidanceClient, GuidanceConfig, GuidanceGenerator};
pub use context::{GuidanceContext, GuidanceTarget};
pub use error::GuidanceError;
pub use fallback::fallback_guidance;
pub use reply::{Guidance, GuidanceSource, parse_reply};
