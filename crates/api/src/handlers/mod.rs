pub mod imports;
pub mod people;
