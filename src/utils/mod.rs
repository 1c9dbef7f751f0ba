//! Utility functions shared across layers.
//!
//! - [`db_error`] - SQLx error classification
//! - [`timeout`] - Deadlines for store-bound operations

pub mod db_error;
pub mod timeout;
