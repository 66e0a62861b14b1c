pub mod health;
pub mod imports;
pub mod people;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /people              GET   paginated/sortable/searchable listing
/// /import/csv          POST  multipart CSV upload -> ImportReport
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/people", people::router())
        .nest("/import", imports::router())
}
