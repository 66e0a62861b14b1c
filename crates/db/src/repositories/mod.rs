//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod affiliation_repo;
pub mod location_repo;
pub mod person_repo;

pub use affiliation_repo::AffiliationRepo;
pub use location_repo::LocationRepo;
pub use person_repo::PersonRepo;
