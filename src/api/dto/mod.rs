//! Data Transfer Objects for API requests and responses.
//!
//! DTOs use Serde for (de)serialization and validator for input limits.

pub mod health;
pub mod shorten;
