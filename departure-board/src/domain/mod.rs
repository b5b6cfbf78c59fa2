//! Domain types for the departure board.
//!
//! These types represent validated transit data. Coordinates enforce their
//! range invariants at construction time; everything else is a plain value
//! recomputed per request.

mod coordinate;
mod departure;
mod route;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use departure::{Departure, TransportKind, Urgency};
pub use route::{Route, RouteStop};
pub use station::{CurrentStation, RankedStation, Station};
