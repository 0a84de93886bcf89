//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::Engine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station resolution and estimation engine
    pub engine: Arc<Engine>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
