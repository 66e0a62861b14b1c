//! Route definitions for the people listing.
//!
//! Mounted at `/people`.

use axum::routing::get;
use axum::Router;

use crate::handlers::people;
use crate::state::AppState;

/// Routes mounted at `/people`.
///
/// ```text
/// GET /    -> list (q, sort, direction, limit, offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(people::list))
}
