//! Handlers for the people listing endpoint.

use axum::extract::{Query, State};
use axum::Json;
use holocron_db::models::person::{PersonFilter, PersonPage};
use holocron_db::repositories::PersonRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for GET /api/v1/people.
#[derive(Debug, Deserialize, Default)]
pub struct ListPeopleParams {
    /// Substring search over person columns and relation names.
    pub q: Option<String>,
    /// Sort column; unknown values fall back to `first_name`.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET / -- paginated, sortable, searchable people listing.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListPeopleParams>,
) -> AppResult<Json<DataResponse<PersonPage>>> {
    let filter = PersonFilter {
        q: params.q,
        sort: params.sort,
        direction: params.direction,
        limit: params.limit,
        offset: params.offset,
    };
    let page = PersonRepo::search(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: page }))
}
