//! Business logic services for the application layer.

pub mod resolver_service;
pub mod shortener_service;
pub mod url_validator;

pub use resolver_service::ResolverService;
pub use shortener_service::ShortenerService;
pub use url_validator::{UrlValidator, ValidatedUrl};
