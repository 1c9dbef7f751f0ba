//! Operating-system hostname resolver.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::resolver::{HostResolver, ResolveError};

/// Resolves hostnames through the system resolver via [`tokio::net::lookup_host`].
///
/// The lookup runs on tokio's blocking pool, so it does not stall request
/// handling threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError> {
        // The port is irrelevant to the lookup; getaddrinfo just needs one.
        let mut addrs = tokio::net::lookup_host((host, 0)).await?;

        match addrs.next() {
            Some(addr) => {
                debug!("Resolved {} to {}", host, addr.ip());
                Ok(())
            }
            None => Err(ResolveError::NoAddresses),
        }
    }
}
