//! Repository for the `affiliations` table.

use sqlx::PgPool;

use crate::models::affiliation::Affiliation;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Find-or-create and lookup operations for affiliations.
pub struct AffiliationRepo;

impl AffiliationRepo {
    /// Resolve an affiliation by exact name, creating it if absent.
    /// Same atomic upsert as [`crate::repositories::LocationRepo::find_or_create`].
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Affiliation, sqlx::Error> {
        let query = format!(
            "INSERT INTO affiliations (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Affiliation>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find an affiliation by exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Affiliation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM affiliations WHERE name = $1");
        sqlx::query_as::<_, Affiliation>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all affiliations ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Affiliation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM affiliations ORDER BY name ASC");
        sqlx::query_as::<_, Affiliation>(&query)
            .fetch_all(pool)
            .await
    }
}
