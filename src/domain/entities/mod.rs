//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`UrlMapping`] - A persisted short code to URL association
//! - [`NewMapping`] - Insert payload for a mapping
//! - [`ShortCode`] - The positive integer identifier handed out to clients

pub mod mapping;

pub use mapping::{InvalidShortCode, NewMapping, ShortCode, UrlMapping};
