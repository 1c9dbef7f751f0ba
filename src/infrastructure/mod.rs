//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`allocation`] - Short code allocators (atomic counter, PostgreSQL sequence)
//! - [`cache`] - Resolve cache (Redis and no-op implementations)
//! - [`dns`] - Hostname resolution for URL validation
//! - [`persistence`] - Mapping repositories (PostgreSQL and in-memory)

pub mod allocation;
pub mod cache;
pub mod dns;
pub mod persistence;
