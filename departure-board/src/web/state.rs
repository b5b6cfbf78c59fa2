//! Application state for the web layer.

use std::sync::Arc;

use crate::config::BoardConfig;

/// Shared application state.
///
/// Holds the transit provider and configuration. Per-viewer state (chosen
/// station, radius, location) travels with each request instead.
pub struct AppState<P> {
    /// Transit data source
    pub provider: Arc<P>,

    /// Search and board limits
    pub config: Arc<BoardConfig>,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(provider: P, config: BoardConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config: Arc::new(config),
        }
    }
}

// Manual impl: the provider itself does not need to be Clone.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: Arc::clone(&self.config),
        }
    }
}
