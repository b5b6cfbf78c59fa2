//! Askama templates for the web frontend.

use askama::Template;

use super::dto::{DeparturesResponse, RouteResponse, StationResult};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with search form and location controls.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub radius_options: Vec<RadiusOption>,
    pub refresh_secs: u64,
}

/// An entry in the radius select.
#[derive(Debug, Clone)]
pub struct RadiusOption {
    pub meters: u32,
    pub selected: bool,
}

impl RadiusOption {
    /// Build the option list, preselecting the default radius.
    pub fn list(options: &[u32], default_meters: f64) -> Vec<Self> {
        options
            .iter()
            .map(|&meters| Self {
                meters,
                selected: f64::from(meters) == default_meters,
            })
            .collect()
    }

    /// Label, e.g. "500 m" or "2 km".
    pub fn label(&self) -> String {
        if self.meters >= 1000 && self.meters % 1000 == 0 {
            format!("{} km", self.meters / 1000)
        } else {
            format!("{} m", self.meters)
        }
    }
}

// ============================================================================
// Fragment Templates (fetch responses, no base.html)
// ============================================================================

/// Station list fragment (nearby or name search).
#[derive(Template)]
#[template(path = "stations.html")]
pub struct StationListTemplate {
    pub stations: Vec<StationResult>,
    /// Shown when the list is empty
    pub empty_message: String,
}

/// Stationboard fragment.
#[derive(Template)]
#[template(path = "departures.html")]
pub struct DepartureListTemplate {
    pub board: DeparturesResponse,
}

/// Route fragment for the stops modal.
#[derive(Template)]
#[template(path = "route.html")]
pub struct RouteTemplate {
    pub route: RouteResponse,
}
