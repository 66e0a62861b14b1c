//! Affiliation entity model.

use holocron_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An affiliation row from the `affiliations` table. Same shape and
/// lookup semantics as locations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Affiliation {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
