//! Domain layer containing business entities and contracts.
//!
//! Defines entities and the traits the application layer depends on,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`allocator`] - Short code allocation contract
//! - [`resolver`] - Hostname reachability contract
//!
//! # Submission Flow
//!
//! 1. [`resolver::HostResolver`] confirms the URL host resolves
//! 2. [`allocator::CodeAllocator`] reserves a unique code
//! 3. [`repositories::MappingRepository`] persists the pair

pub mod allocator;
pub mod entities;
pub mod repositories;
pub mod resolver;
