//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Requests per second replenished for each client IP.
pub const SHORTEN_PER_SECOND: u64 = 2;

/// Burst allowance for each client IP.
pub const SHORTEN_BURST: u32 = 50;

/// Creates the rate limiter guarding `POST /api/shorturl`.
///
/// Every accepted submission consumes a short code and a DNS lookup, so
/// submissions are limited per client IP (peer socket address). Requests over
/// the limit receive `429 Too Many Requests`.
///
/// Requires the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn shorten_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(SHORTEN_PER_SECOND)
            .burst_size(SHORTEN_BURST)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
