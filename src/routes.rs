//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check: database and providers (public)
//! - `/auth/*`, `/listings/*`, `/users/*`, `/consultations/*`, `/uploads/*`
//!   - REST resources, see [`crate::api::routes::resource_routes`]
//! - `/verification/*`       - Phone verification (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Only the configured frontend origin
//! - **Identity** - Bearer token resolution for every route
//! - **Rate limiting** - Per-IP token bucket on verification routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// CORS policy for the browser frontend at `origin`.
///
/// An origin that is not a valid header value allows no cross-origin access.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(origin.trim_end_matches('/')) {
        Ok(origin) => base.allow_origin(origin),
        Err(_) => {
            ::tracing::warn!(origin, "CORS origin is not a valid header value");
            base
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// Must be served with connect info (see [`crate::server::run`]) so the rate
/// limiter can key on the peer address.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let verification = api::routes::verification_routes().layer(rate_limit::verification_layer());

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::resource_routes())
        .merge(verification)
        .layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(cors_layer(&state.frontend_origin))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
