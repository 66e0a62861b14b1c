//! Pure domain logic for the character catalog.
//!
//! This crate has no I/O: no database access, no async, no HTTP. It holds
//! the CSV import pipeline (parsing, normalization, per-row accounting),
//! the shared ID/timestamp aliases, the domain error enum, and the
//! listing/pagination helpers used by the repository layer.

pub mod error;
pub mod import;
pub mod listing;
pub mod types;
