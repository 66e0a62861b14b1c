//! Handlers for the CSV import endpoint.
//!
//! The upload handler reads the multipart file, runs the import pipeline
//! row by row, and returns an [`ImportReport`]. Individual bad rows are
//! collected into the report; only infrastructure failures (pool errors,
//! unexpected SQL errors) abort the request.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use holocron_core::import::{
    evaluate_row, parse_rows, ImportReport, PersonCandidate, RowError, RowOutcome, RowSkip,
};
use holocron_db::models::person::CreatePerson;
use holocron_db::repositories::{AffiliationRepo, LocationRepo, PersonRepo};
use holocron_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// SQLSTATE codes that mark a single row as bad rather than the whole
/// import: unique violation, check violation, foreign key violation.
const ROW_ERROR_CODES: &[&str] = &["23505", "23514", "23503"];

/// POST /csv -- upload a CSV file (multipart field `file`) and import it.
///
/// Returns 200 with the report when at least one row imported or the
/// failures are row-level, 422 when the import failed outright (bad
/// headers, or every row errored with none imported).
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImportReport>>)> {
    let content = read_csv_field(&mut multipart).await?;

    let report = run_import(&state.pool, &content).await?;

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        "CSV import finished"
    );

    let status = if report.failed() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: report })))
}

/// Pull the uploaded file content out of the multipart body.
///
/// Accepts the field named `file`, or any field carrying a filename, so
/// clients that name the part after the file still work.
async fn read_csv_field(multipart: &mut Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    Err(AppError::BadRequest(
        "Missing file upload (multipart field 'file')".to_string(),
    ))
}

/// Run the import pipeline over raw CSV content.
async fn run_import(pool: &DbPool, content: &str) -> Result<ImportReport, AppError> {
    let rows = match parse_rows(content) {
        Ok(rows) => rows,
        Err(message) => return Ok(ImportReport::header_failure(message)),
    };

    let mut report = ImportReport::default();
    for row in rows {
        match evaluate_row(&row.fields) {
            RowOutcome::Skip(reason) => {
                report.skipped.push(RowSkip { line: row.line, reason });
            }
            RowOutcome::Candidate(candidate) => match import_candidate(pool, &candidate).await {
                Ok(()) => report.imported += 1,
                Err(err) if is_row_error(&err) => {
                    report.errors.push(RowError {
                        line: row.line,
                        message: row_error_message(&candidate, &err),
                    });
                }
                Err(err) => return Err(err.into()),
            },
        }
    }
    Ok(report)
}

/// Resolve relation rows, then insert the person with its join rows.
///
/// Locations and affiliations are created before the person, so they stay
/// behind even when the person insert fails. That matches how re-imports
/// behave: a later upload of the same file finds the relations already
/// present.
async fn import_candidate(
    pool: &DbPool,
    candidate: &PersonCandidate,
) -> Result<(), sqlx::Error> {
    let mut location_ids = Vec::with_capacity(candidate.locations.len());
    for name in &candidate.locations {
        location_ids.push(LocationRepo::find_or_create(pool, name).await?.id);
    }

    let mut affiliation_ids = Vec::with_capacity(candidate.affiliations.len());
    for name in &candidate.affiliations {
        affiliation_ids.push(AffiliationRepo::find_or_create(pool, name).await?.id);
    }

    let input = CreatePerson {
        first_name: candidate.first_name.clone(),
        last_name: candidate.last_name.clone(),
        species: candidate.species.clone(),
        gender: candidate.gender.as_str().to_string(),
        weapon: candidate.weapon.clone(),
        vehicle: candidate.vehicle.clone(),
        location_ids,
        affiliation_ids,
    };
    PersonRepo::create_with_relations(pool, &input).await?;
    Ok(())
}

/// Whether a database error should be recorded against the row instead of
/// aborting the import.
fn is_row_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db)
            if db.code().as_deref().is_some_and(|c| ROW_ERROR_CODES.contains(&c))
    )
}

/// Human-readable message for a row-level database error.
fn row_error_message(candidate: &PersonCandidate, err: &sqlx::Error) -> String {
    let full_name = match &candidate.last_name {
        Some(last) => format!("{} {}", candidate.first_name, last),
        None => candidate.first_name.clone(),
    };
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            format!("a person named '{full_name}' already exists")
        }
        _ => format!("could not save '{full_name}': {err}"),
    }
}
