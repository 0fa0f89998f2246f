//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Creates a per-IP rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(100)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter for deployments behind a trusted reverse proxy.
///
/// Same limits as [`layer`], but the client IP is read from
/// `X-Forwarded-For` / `X-Real-IP` before falling back to the peer
/// address. Enable only when the proxy strips these headers from
/// client requests.
pub fn proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(100)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
