//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Builds the per-request span from the method and path.
///
/// The query string is left out: OAuth callbacks carry authorization codes
/// there and listing filters add nothing the path does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSpan;

impl<B> MakeSpan<B> for PathSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            version = ?request.version(),
        )
    }
}

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Creates a span at `INFO` level with:
///   - HTTP method
///   - URI path, without the query string
///   - HTTP version
///
/// **On Response:**
/// - Logs at `INFO` level with:
///   - Status code
///   - Latency in milliseconds
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET path=/listings version=HTTP/1.1}: finished processing request latency=12 ms status=200
/// ```
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .merge(resource_routes())
///     .layer(tracing::layer());
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, PathSpan> {
    TraceLayer::new_for_http()
        .make_span_with(PathSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
