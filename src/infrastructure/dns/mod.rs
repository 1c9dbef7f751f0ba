//! Hostname resolution backends for URL reachability checks.

mod system_resolver;

pub use system_resolver::SystemResolver;
