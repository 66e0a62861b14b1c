//! Pagination, sorting, and search-pattern helpers for the people listing.
//!
//! Lives in `core` (no DB deps) so the repository layer and any future CLI
//! tooling share one definition of what a valid page request looks like.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of people per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of people per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1).min(MAX_PAGE_LIMIT)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns the listing endpoint may sort by. Anything else falls back to
/// the default; the whitelist is what lets the repository interpolate the
/// column name into SQL.
pub const SORTABLE_COLUMNS: &[&str] = &[
    "first_name",
    "last_name",
    "species",
    "gender",
    "weapon",
    "vehicle",
];

/// Default sort column.
pub const DEFAULT_SORT_COLUMN: &str = "first_name";

/// Resolve a requested sort column against the whitelist.
pub fn sort_column(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|col| SORTABLE_COLUMNS.iter().find(|c| **c == col))
        .copied()
        .unwrap_or(DEFAULT_SORT_COLUMN)
}

/// Resolve a requested sort direction (case-insensitive); defaults to ASC.
pub fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested.map(str::to_lowercase).as_deref() {
        Some("desc") => "DESC",
        _ => "ASC",
    }
}

// ---------------------------------------------------------------------------
// Search patterns
// ---------------------------------------------------------------------------

/// Build a `%...%` LIKE pattern from a raw search term, escaping the LIKE
/// metacharacters (`\`, `%`, `_`). Returns `None` for blank input so the
/// caller can drop the filter entirely.
pub fn like_pattern(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(trimmed.len() + 2);
    escaped.push('%');
    for c in trimmed.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
