//! Repository for the `people` table and its relation join tables.

use holocron_core::listing::{clamp_limit, clamp_offset, like_pattern, sort_column, sort_direction};
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person, PersonFilter, PersonPage, PersonWithRelations};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, species, gender, weapon, vehicle, created_at, updated_at";

/// Subqueries embedding relation names as sorted text arrays.
const RELATION_ARRAYS: &str = "ARRAY(SELECT l.name FROM person_locations pl \
       JOIN locations l ON l.id = pl.location_id \
       WHERE pl.person_id = people.id ORDER BY l.name) AS locations, \
     ARRAY(SELECT a.name FROM person_affiliations pa \
       JOIN affiliations a ON a.id = pa.affiliation_id \
       WHERE pa.person_id = people.id ORDER BY a.name) AS affiliations";

/// Filter matching the search term against every person column and the
/// related location/affiliation names. `$1` is the LIKE pattern, or NULL
/// to match everything.
const SEARCH_FILTER: &str = "($1::text IS NULL \
     OR first_name ILIKE $1 OR last_name ILIKE $1 \
     OR species ILIKE $1 OR gender ILIKE $1 \
     OR weapon ILIKE $1 OR vehicle ILIKE $1 \
     OR EXISTS (SELECT 1 FROM person_locations pl \
          JOIN locations l ON l.id = pl.location_id \
          WHERE pl.person_id = people.id AND l.name ILIKE $1) \
     OR EXISTS (SELECT 1 FROM person_affiliations pa \
          JOIN affiliations a ON a.id = pa.affiliation_id \
          WHERE pa.person_id = people.id AND a.name ILIKE $1))";

/// Creation and listing operations for people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a person and its location/affiliation join rows in a single
    /// transaction, returning the created row.
    ///
    /// A duplicate `(first_name, last_name)` pair fails the whole
    /// transaction with the `uq_people_first_last` unique violation; the
    /// locations and affiliations themselves are separate rows created
    /// beforehand and are not rolled back.
    pub async fn create_with_relations(
        pool: &PgPool,
        input: &CreatePerson,
    ) -> Result<Person, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO people (first_name, last_name, species, gender, weapon, vehicle)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let person = sqlx::query_as::<_, Person>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.species)
            .bind(&input.gender)
            .bind(&input.weapon)
            .bind(&input.vehicle)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO person_locations (person_id, location_id)
             SELECT $1, unnest($2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(person.id)
        .bind(&input.location_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO person_affiliations (person_id, affiliation_id)
             SELECT $1, unnest($2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(person.id)
        .bind(&input.affiliation_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(person)
    }

    /// Find a person by exact name pair. `last_name = None` matches rows
    /// with a NULL last name.
    pub async fn find_by_name(
        pool: &PgPool,
        first_name: &str,
        last_name: Option<&str>,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM people
             WHERE first_name = $1 AND last_name IS NOT DISTINCT FROM $2"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(first_name)
            .bind(last_name)
            .fetch_optional(pool)
            .await
    }

    /// One page of people with relation names embedded, plus the total
    /// match count for the same filter.
    ///
    /// The sort column and direction are interpolated after whitelisting;
    /// the search pattern is bound. `id` breaks ties for a stable order.
    pub async fn search(pool: &PgPool, filter: &PersonFilter) -> Result<PersonPage, sqlx::Error> {
        let pattern = filter.q.as_deref().and_then(like_pattern);
        let sort = sort_column(filter.sort.as_deref());
        let direction = sort_direction(filter.direction.as_deref());
        let limit = clamp_limit(filter.limit);
        let offset = clamp_offset(filter.offset);

        let count_query = format!("SELECT COUNT(*) FROM people WHERE {SEARCH_FILTER}");
        let total_count: i64 = sqlx::query_scalar(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let page_query = format!(
            "SELECT {COLUMNS}, {RELATION_ARRAYS}
             FROM people
             WHERE {SEARCH_FILTER}
             ORDER BY {sort} {direction}, id ASC
             LIMIT $2 OFFSET $3"
        );
        let people = sqlx::query_as::<_, PersonWithRelations>(&page_query)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(PersonPage {
            people,
            total_count,
            limit,
            offset,
        })
    }

    /// Total number of people. Used by the health/test tooling.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM people")
            .fetch_one(pool)
            .await
    }
}
