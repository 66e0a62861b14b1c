//! Row models and DTOs, one module per entity.

pub mod affiliation;
pub mod location;
pub mod person;
