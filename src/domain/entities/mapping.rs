//! URL mapping entity and the short code value type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A short code: a positive integer issued by a [`crate::domain::allocator::CodeAllocator`].
///
/// Serializes as a bare JSON number so responses carry `"short_url": 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortCode(i64);

/// Returned when a string or integer cannot become a [`ShortCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("short code must be a positive decimal integer")]
pub struct InvalidShortCode;

impl ShortCode {
    /// The first code handed out on an empty store.
    pub const FIRST: ShortCode = ShortCode(1);

    pub fn new(value: i64) -> Result<Self, InvalidShortCode> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(InvalidShortCode)
        }
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// The code following this one, or `None` once the `i64` space is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl FromStr for ShortCode {
    type Err = InvalidShortCode;

    /// Accepts only ASCII digits: no sign, whitespace, exponent or radix prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidShortCode);
        }
        let value: i64 = s.parse().map_err(|_| InvalidShortCode)?;
        Self::new(value)
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted association between a short code and the submitted URL.
///
/// Created once, never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMapping {
    pub code: ShortCode,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    pub fn new(code: ShortCode, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            original_url,
            created_at,
        }
    }
}

/// Input data for persisting a new mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMapping {
    pub code: ShortCode,
    pub original_url: String,
}
