//! Web layer for the departure board.
//!
//! Provides HTTP endpoints for finding stations and showing their boards.
//! Each endpoint answers with an HTML fragment when the request accepts
//! `text/html`, and with JSON otherwise.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
