//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Seconds between replenished verification requests.
const VERIFICATION_REPLENISH_SECS: u64 = 12;
const VERIFICATION_BURST: u32 = 5;

/// Creates the rate limiter for the phone verification endpoints.
///
/// Each request to `/verification/*` may cost an SMS, so the budget is small.
///
/// # Limits
///
/// - **Rate**: 1 request every 12 seconds
/// - **Burst**: 5 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let verification = Router::new()
///     .route("/verification/send", post(send_code_handler))
///     .layer(rate_limit::verification_layer());
/// ```
pub fn verification_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(VERIFICATION_REPLENISH_SECS)
            .burst_size(VERIFICATION_BURST)
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
