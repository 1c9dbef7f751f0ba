//! Host reachability contract used by URL validation.

use async_trait::async_trait;

/// Why a hostname could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("hostname resolved to no addresses")]
    NoAddresses,

    #[error("lookup failed: {0}")]
    Lookup(#[from] std::io::Error),
}

/// Resolves hostnames to check that a submitted URL points somewhere real.
///
/// Implementations make a single attempt. Timeouts are applied by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Succeeds if `host` resolves to at least one address.
    async fn resolve(&self, host: &str) -> Result<(), ResolveError>;
}
