//! Location entity model.

use holocron_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A location row from the `locations` table. Names are unique and
/// stored title-cased; rows are created lazily by the importer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
