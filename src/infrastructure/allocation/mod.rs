//! Short code allocator implementations.
//!
//! Exactly one allocator is chosen per process (see [`crate::config::AllocatorKind`]):
//!
//! - [`CounterAllocator`] - lock-free in-process counter, single instance only
//! - [`PgSequenceAllocator`] - database sequence, safe for multiple instances

pub mod counter_allocator;
pub mod pg_sequence_allocator;

pub use counter_allocator::CounterAllocator;
pub use pg_sequence_allocator::PgSequenceAllocator;
