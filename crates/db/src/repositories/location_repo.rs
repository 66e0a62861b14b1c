//! Repository for the `locations` table.

use sqlx::PgPool;

use crate::models::location::Location;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Find-or-create and lookup operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Resolve a location by exact name, creating it if absent, in a
    /// single atomic statement.
    ///
    /// The no-op `DO UPDATE` on conflict makes `RETURNING` yield the
    /// existing row, so concurrent imports racing on the same name both
    /// get the same id instead of one failing on the unique constraint.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a location by exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE name = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all locations ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY name ASC");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }
}
