//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Local, Utc};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::Coordinate;
use crate::nearby::{find_nearby, format_distance};
use crate::transport::{TransitProvider, TransportError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<P: TransitProvider + 'static>(state: AppState<P>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page::<P>))
        .route("/health", get(health))
        .route("/api/stations/nearby", get(nearby_stations::<P>))
        .route("/api/stations/search", get(search_stations::<P>))
        .route("/api/departures", get(departures::<P>))
        .route("/api/route", get(route::<P>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page<P: TransitProvider>(State(state): State<AppState<P>>) -> impl IntoResponse {
    let template = IndexTemplate {
        radius_options: RadiusOption::list(
            &state.config.radius_options,
            state.config.default_radius_meters,
        ),
        refresh_secs: state.config.refresh_secs,
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Render a template into an HTML response.
fn render<T: Template>(template: T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Stations around a position, nearest first.
async fn nearby_stations<P: TransitProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    query: Result<Query<NearbyRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let origin = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let radius = req.radius.unwrap_or(state.config.default_radius_meters);
    if !state.config.accepts_radius(radius) {
        return Err(AppError::BadRequest {
            message: format!(
                "Invalid radius: {} (must be between 0 and {} meters)",
                radius, state.config.max_radius_meters
            ),
        });
    }

    let ranked = find_nearby(state.provider.as_ref(), origin, radius).await?;
    let stations: Vec<StationResult> = ranked.iter().map(StationResult::from_ranked).collect();

    if accepts_html(&headers) {
        let template = StationListTemplate {
            stations,
            empty_message: "No stations found nearby. Try increasing the radius.".to_string(),
        };
        render(template)
    } else {
        Ok(Json(StationsResponse { stations }).into_response())
    }
}

/// Search stations by name.
async fn search_stations<P: TransitProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    query: Result<Query<StationSearchRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let query = req.q.trim();
    if query.chars().count() < state.config.min_query_chars {
        return Err(AppError::BadRequest {
            message: format!(
                "Please enter at least {} characters",
                state.config.min_query_chars
            ),
        });
    }

    let found = state.provider.search_stations(query).await?;
    let stations: Vec<StationResult> = found.iter().map(StationResult::from_station).collect();

    if accepts_html(&headers) {
        let template = StationListTemplate {
            stations,
            empty_message: format!("No stations found for \"{}\"", query),
        };
        render(template)
    } else {
        Ok(Json(StationsResponse { stations }).into_response())
    }
}

/// Upcoming departures at a station.
async fn departures<P: TransitProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    query: Result<Query<DeparturesRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let station = req.station.trim();
    if station.is_empty() {
        return Err(AppError::BadRequest {
            message: "No station selected".to_string(),
        });
    }

    let limit = req
        .limit
        .unwrap_or(state.config.board_limit)
        .clamp(1, state.config.max_board_limit);

    let rows = state.provider.stationboard(station, limit).await?;

    let now = Utc::now();
    let board = DeparturesResponse {
        station: station.to_string(),
        name: req
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| station.to_string()),
        distance_display: req
            .distance
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(format_distance),
        departures: rows
            .iter()
            .map(|d| DepartureResult::from_departure(d, now))
            .collect(),
        updated_at: Local::now().format("%H:%M:%S").to_string(),
    };

    if accepts_html(&headers) {
        render(DepartureListTemplate { board })
    } else {
        Ok(Json(board).into_response())
    }
}

/// Sample route for a departure, with intermediate stops.
async fn route<P: TransitProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    query: Result<Query<RouteRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let from = req.from.trim();
    let to = req.to.trim();
    if from.is_empty() || to.is_empty() {
        return Err(AppError::BadRequest {
            message: "Both from and to are required".to_string(),
        });
    }

    let user_location = match (req.lat, req.lon) {
        (Some(lat), Some(lon)) => {
            Some(Coordinate::new(lat, lon).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?)
        }
        _ => None,
    };

    let route = state
        .provider
        .connection(from, to)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: "No route information available".to_string(),
        })?;

    let line = req.line.as_deref().map(str::trim).filter(|l| !l.is_empty());
    let title = match line {
        Some(line) => format!("{} → {}", line, to),
        None => format!("→ {}", to),
    };
    let response = RouteResponse::from_route(&route, title, from, user_location);

    if accepts_html(&headers) {
        render(RouteTemplate { route: response })
    } else {
        Ok(Json(response).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<TransportError> for AppError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Conversion(c) => AppError::NotFound {
                message: c.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
