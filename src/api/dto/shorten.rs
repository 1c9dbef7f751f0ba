//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{ShortCode, UrlMapping};

/// URL-encoded form body of `POST /api/shorturl`.
///
/// A missing `url` field deserializes as an empty string, which then fails
/// validation like any other invalid URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Successful shortening result.
///
/// ```json
/// { "original_url": "https://example.com", "short_url": 1 }
/// ```
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: ShortCode,
}

impl From<UrlMapping> for ShortenResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            original_url: mapping.original_url,
            short_url: mapping.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_form_validation() {
        let ok = ShortenForm {
            url: "https://example.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = ShortenForm { url: String::new() };
        assert!(empty.validate().is_err());

        let huge = ShortenForm {
            url: format!("https://example.com/{}", "a".repeat(2048)),
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_response_shape() {
        let mapping = UrlMapping::new(
            ShortCode::new(1).unwrap(),
            "https://example.com".to_string(),
            Utc::now(),
        );

        let json = serde_json::to_value(ShortenResponse::from(mapping)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "original_url": "https://example.com", "short_url": 1 })
        );
    }
}
