//! Station relief finder server.
//!
//! Answers "where is the nearest station toilet, and how long will it take
//! to get there?" from a static station catalog, optionally refreshed from a
//! live transit-data API, with congestion-aware arrival estimates.

pub mod clock;
pub mod config;
pub mod directory;
pub mod domain;
pub mod engine;
pub mod guidance;
pub mod stations;
pub mod web;
