//! Core types, constants, and pure logic for the CSV character importer.
//!
//! This module has zero external dependencies beyond parsing (no DB, no
//! async, no I/O). It provides:
//!
//! - Delimiter detection and lenient table parsing via the `csv` crate
//! - Header validation against the required column set
//! - Per-row normalization: gender mapping, name splitting, relation-list
//!   parsing, numeric-artifact stripping for optional fields
//! - The [`ImportReport`] accumulator threaded through row processing
//!
//! Persistence (find-or-create of relations, person insertion) happens in
//! the API layer against the repository crate; this module only decides
//! what each row *means*.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Headers that must be present (after trim + title-case normalization).
/// Order-insensitive; extra columns such as Weapon and Vehicle are allowed.
pub const REQUIRED_HEADERS: &[&str] = &["Name", "Location", "Species", "Gender", "Affiliations"];

/// Skip reason recorded when a required field is blank.
pub const MISSING_FIELD_REASON: &str =
    "missing required field (Name, Location, Species, Gender, or Affiliations)";

/// A value that is nothing but an optionally-signed number. Spreadsheet
/// tools sometimes coerce text cells to numbers; such values carry no
/// information and are dropped from optional fields.
static NUMERIC_ARTIFACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender as stored in the database (CHECK constraint on the column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Return the gender name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse a stored gender string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Normalize a raw CSV gender cell.
    ///
    /// Trims and lowercases, then maps `m`/`male` and `f`/`female` to the
    /// canonical values. Any other non-blank value becomes [`Gender::Other`].
    /// Blank input returns `None`, which the row check treats as a missing
    /// required field.
    pub fn normalize(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase();
        match key.as_str() {
            "" => None,
            "m" | "male" => Some(Self::Male),
            "f" | "female" => Some(Self::Female),
            _ => Some(Self::Other),
        }
    }

    /// All valid stored values.
    pub const ALL: &'static [&'static str] = &["male", "female", "other"];
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Import report
// ---------------------------------------------------------------------------

/// A row excluded from import because required data was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSkip {
    /// 1-indexed file line (the header is line 1, data starts at 2).
    pub line: i64,
    pub reason: String,
}

/// A row that had all required data but failed persistence/validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-indexed file line (the header is line 1, data starts at 2).
    pub line: i64,
    pub message: String,
}

/// Accumulated outcome of one import call.
///
/// Every data row lands in exactly one bucket: it increments `imported`,
/// appends to `skipped`, or appends to `errors`. The report is returned to
/// the caller and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: u32,
    pub skipped: Vec<RowSkip>,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// Report for a fatally malformed file: nothing processed, one error.
    pub fn header_failure(message: String) -> Self {
        Self {
            imported: 0,
            skipped: Vec::new(),
            errors: vec![RowError { line: 1, message }],
        }
    }

    /// `true` when the import produced errors and nothing was imported.
    pub fn failed(&self) -> bool {
        !self.errors.is_empty() && self.imported == 0
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A data row with normalized keys and trimmed values.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    /// 1-indexed file line (data rows start at 2).
    pub line: i64,
    /// Title-cased header -> trimmed cell value.
    pub fields: HashMap<String, String>,
}

/// Detect the field delimiter: tab-separated if the content contains a tab
/// character anywhere, otherwise comma-separated.
pub fn detect_delimiter(content: &str) -> u8 {
    if content.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// Parse raw CSV/TSV content into normalized rows.
///
/// Validates the header row first; a missing required header is fatal and
/// returns `Err` with a single descriptive message (no rows are parsed).
/// Parsing is lenient: rows may have fewer or more cells than the header
/// (`flexible`), and the csv crate's non-strict quoting tolerates stray
/// quote characters inside fields.
pub fn parse_rows(content: &str) -> Result<Vec<ParsedRow>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format!("CSV parse error: {e}"))?
        .iter()
        .map(title_case)
        .collect();

    validate_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx as i64 + 2;
        let record = record.map_err(|e| format!("CSV parse error on line {line}: {e}"))?;

        let fields: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.trim().to_string()))
            .collect();

        rows.push(ParsedRow { line, fields });
    }

    Ok(rows)
}

/// Check that every required header is present. Extra headers are fine.
pub fn validate_headers(headers: &[String]) -> Result<(), String> {
    let missing = REQUIRED_HEADERS
        .iter()
        .any(|required| !headers.iter().any(|h| h == required));
    if missing {
        return Err(format!(
            "CSV must have headers: {}",
            REQUIRED_HEADERS.join(", ")
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Row evaluation
// ---------------------------------------------------------------------------

/// What a single data row resolves to before touching the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// All required fields present; ready for relation resolution + insert.
    Candidate(PersonCandidate),
    /// Required data missing; excluded from import, not an error.
    Skip(String),
}

/// A fully normalized person ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonCandidate {
    pub first_name: String,
    pub last_name: Option<String>,
    pub species: String,
    pub gender: Gender,
    pub weapon: Option<String>,
    pub vehicle: Option<String>,
    /// Title-cased, deduplicated, in file order. Never empty.
    pub locations: Vec<String>,
    /// Title-cased, deduplicated, in file order. Never empty.
    pub affiliations: Vec<String>,
}

/// Evaluate one normalized row.
///
/// Blank Name, Location, Species, Affiliations, or a gender that is blank
/// after normalization all yield [`RowOutcome::Skip`]. Otherwise returns a
/// [`PersonCandidate`] with every field normalized.
pub fn evaluate_row(fields: &HashMap<String, String>) -> RowOutcome {
    let get = |key: &str| fields.get(key).map(String::as_str).unwrap_or("").trim();

    let name = get("Name");
    let species = get("Species");
    let gender = Gender::normalize(get("Gender"));
    let locations = split_relation_list(get("Location"));
    let affiliations = split_relation_list(get("Affiliations"));

    let Some(gender) = gender else {
        return RowOutcome::Skip(MISSING_FIELD_REASON.to_string());
    };
    if name.is_empty() || species.is_empty() || locations.is_empty() || affiliations.is_empty() {
        return RowOutcome::Skip(MISSING_FIELD_REASON.to_string());
    }

    let (first_name, last_name) = split_name(name);

    RowOutcome::Candidate(PersonCandidate {
        first_name,
        last_name,
        species: title_case(species),
        gender,
        weapon: optional_field(get("Weapon")),
        vehicle: optional_field(get("Vehicle")),
        locations,
        affiliations,
    })
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Title-case a string: capitalize the first letter of each word and
/// lowercase the rest. Word boundaries are whitespace plus any
/// non-alphanumeric character, so "obi-wan" becomes "Obi-Wan".
/// Inner whitespace collapses to single spaces.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_boundary = true;
    for c in word.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_boundary = !c.is_alphanumeric();
    }
    out
}

/// Split a full name into (first, last).
///
/// The name is title-cased, then split on whitespace: the final token is
/// the last name and everything before it joins into the first name. A
/// single-token name has no last name.
pub fn split_name(name: &str) -> (String, Option<String>) {
    let titled = title_case(name);
    let parts: Vec<&str> = titled.split(' ').collect();
    match parts.split_last() {
        Some((last, rest)) if !rest.is_empty() => (rest.join(" "), Some((*last).to_string())),
        _ => (titled, None),
    }
}

/// Normalize an optional field (Weapon, Vehicle): blank values and
/// spreadsheet numeric artifacts become `None`.
pub fn optional_field(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || NUMERIC_ARTIFACT.is_match(value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Split a comma-separated relation list into title-cased names,
/// dropping blanks and deduplicating while preserving file order.
pub fn split_relation_list(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in raw.split(',') {
        let name = title_case(token.trim());
        if name.is_empty() || names.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
