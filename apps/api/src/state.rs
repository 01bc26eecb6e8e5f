use std::sync::Arc;

use crate::config::Config;
use crate::inference::pipeline::Pipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated, so it is shared without locking.
    pub pipeline: Arc<Pipeline>,
    pub config: Config,
}
