//! Board and search configuration.

use std::time::Duration;

/// Limits and defaults for station search and board display.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Search radius used when the caller gives none (meters).
    pub default_radius_meters: f64,

    /// Largest accepted search radius (meters).
    pub max_radius_meters: f64,

    /// Radius choices offered on the index page (meters).
    pub radius_options: Vec<u32>,

    /// Rows requested per stationboard when the caller gives none.
    pub board_limit: u8,

    /// Largest accepted stationboard size.
    pub max_board_limit: u8,

    /// Minimum length of a trimmed name query.
    pub min_query_chars: usize,

    /// How often an open board is reloaded (seconds).
    pub refresh_secs: u64,
}

impl BoardConfig {
    /// Returns the refresh period as a Duration.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Set the refresh period.
    pub fn with_refresh_secs(mut self, secs: u64) -> Self {
        self.refresh_secs = secs;
        self
    }

    /// Set the default search radius.
    pub fn with_default_radius(mut self, meters: f64) -> Self {
        self.default_radius_meters = meters;
        self
    }

    /// Check a requested radius against the configured bounds.
    pub fn accepts_radius(&self, meters: f64) -> bool {
        meters.is_finite() && meters > 0.0 && meters <= self.max_radius_meters
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_radius_meters: 1000.0,
            max_radius_meters: 10_000.0,
            radius_options: vec![250, 500, 1000, 2000, 5000],
            board_limit: 6,
            max_board_limit: 40,
            min_query_chars: 2,
            refresh_secs: 60,
        }
    }
}
