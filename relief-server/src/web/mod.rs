//! Web layer for the station relief finder.
//!
//! JSON endpoints over the engine: line lookup, nearest station, arrival
//! estimates, congestion and guidance.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
