//! Application layer services implementing business logic.
//!
//! Services consume domain traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::url_validator::UrlValidator`] - URL syntax and reachability checks
//! - [`services::shortener_service::ShortenerService`] - Validate, allocate, persist
//! - [`services::resolver_service::ResolverService`] - Code to URL resolution

pub mod services;
