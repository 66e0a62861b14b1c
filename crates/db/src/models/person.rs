//! Person entity model and DTOs.

use holocron_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A person row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub species: String,
    /// One of `male`, `female`, `other` (CHECK constraint).
    pub gender: String,
    pub weapon: Option<String>,
    pub vehicle: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a person together with its relation rows.
///
/// `location_ids` and `affiliation_ids` must be non-empty: every person
/// has at least one of each, and the importer guarantees it by skipping
/// rows with blank relation lists.
#[derive(Debug, Clone)]
pub struct CreatePerson {
    pub first_name: String,
    pub last_name: Option<String>,
    pub species: String,
    pub gender: String,
    pub weapon: Option<String>,
    pub vehicle: Option<String>,
    pub location_ids: Vec<DbId>,
    pub affiliation_ids: Vec<DbId>,
}

/// A person with its related location/affiliation names embedded,
/// as returned by the listing query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonWithRelations {
    pub id: DbId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub species: String,
    pub gender: String,
    pub weapon: Option<String>,
    pub vehicle: Option<String>,
    /// Related location names, sorted alphabetically.
    pub locations: Vec<String>,
    /// Related affiliation names, sorted alphabetically.
    pub affiliations: Vec<String>,
}

/// Filter/sort/pagination input for the listing query. All fields are
/// optional; the repository clamps and whitelists the values.
#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
    /// Substring search over person columns and relation names.
    pub q: Option<String>,
    /// Sort column (whitelisted; defaults to `first_name`).
    pub sort: Option<String>,
    /// `asc` or `desc` (defaults to `asc`).
    pub direction: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of listing results plus the unpaginated match count.
#[derive(Debug, Serialize)]
pub struct PersonPage {
    pub people: Vec<PersonWithRelations>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}
