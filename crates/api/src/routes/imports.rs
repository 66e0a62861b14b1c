//! Route definitions for the CSV importer.
//!
//! Mounted at `/import`.

use axum::routing::post;
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// Routes mounted at `/import`.
///
/// ```text
/// POST /csv    -> upload_csv (multipart, field "file")
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/csv", post(imports::upload_csv))
}
