//! End-to-end tests for the people listing endpoint: search, sorting,
//! pagination, and parameter clamping.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, import_csv};
use sqlx::PgPool;

const HEADER: &str = "Name,Location,Species,Gender,Affiliations,Weapon,Vehicle";

/// Seed three people through the import pipeline so the listing tests
/// exercise the same data path production uses.
async fn seed(pool: &PgPool) {
    let csv = format!(
        "{HEADER}\n\
         luke skywalker,tatooine,human,m,\"rebellion, jedi order\",lightsaber,x-wing\n\
         leia organa,alderaan,human,f,rebellion,blaster,\n\
         chewbacca,kashyyyk,wookiee,male,rebellion,bowcaster,millennium falcon\n"
    );
    let report = import_csv(build_test_app(pool.clone()), &csv, StatusCode::OK).await;
    assert_eq!(report["imported"], 3);
}

// ---------------------------------------------------------------------------
// Listing shape
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn lists_people_with_relations_embedded(pool: PgPool) {
    seed(&pool).await;

    let response = get(build_test_app(pool), "/api/v1/people").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_count"], 3);
    assert_eq!(data["limit"], 20);
    assert_eq!(data["offset"], 0);

    // Default sort is first_name ASC.
    let people = data["people"].as_array().unwrap();
    assert_eq!(people[0]["first_name"], "Chewbacca");
    assert_eq!(people[1]["first_name"], "Leia");
    assert_eq!(people[2]["first_name"], "Luke");

    // Relation names come back sorted.
    assert_eq!(
        people[2]["affiliations"],
        serde_json::json!(["Jedi Order", "Rebellion"])
    );
    assert_eq!(people[2]["locations"], serde_json::json!(["Tatooine"]));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_matches_columns_and_relation_names(pool: PgPool) {
    seed(&pool).await;

    // Species column.
    let response = get(build_test_app(pool.clone()), "/api/v1/people?q=wookiee").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(json["data"]["people"][0]["first_name"], "Chewbacca");

    // Affiliation name, case-insensitive.
    let response = get(build_test_app(pool.clone()), "/api/v1/people?q=JEDI").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(json["data"]["people"][0]["first_name"], "Luke");

    // No match.
    let response = get(build_test_app(pool), "/api/v1/people?q=ewok").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_count"], 0);
}

// ---------------------------------------------------------------------------
// Sorting and pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sort_and_direction_are_applied(pool: PgPool) {
    seed(&pool).await;

    let response = get(
        build_test_app(pool),
        "/api/v1/people?sort=species&direction=desc",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["people"][0]["species"], "Wookiee");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pagination_splits_pages_without_overlap(pool: PgPool) {
    seed(&pool).await;

    let response = get(build_test_app(pool.clone()), "/api/v1/people?limit=2&offset=0").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["people"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["total_count"], 3);

    let response = get(build_test_app(pool), "/api/v1/people?limit=2&offset=2").await;
    let json = body_json(response).await;
    let people = json["data"]["people"].as_array().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["first_name"], "Luke");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_limit_is_clamped(pool: PgPool) {
    seed(&pool).await;

    let response = get(build_test_app(pool), "/api/v1/people?limit=5000").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["limit"], 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_sort_column_is_ignored(pool: PgPool) {
    seed(&pool).await;

    let response = get(
        build_test_app(pool),
        "/api/v1/people?sort=id;+DROP+TABLE+people",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["people"][0]["first_name"], "Chewbacca");
}
