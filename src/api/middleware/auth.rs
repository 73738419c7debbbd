//! Bearer token identity resolution.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use tracing::debug;

use crate::api::extractors::{CurrentUser, RejectedToken};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the caller from the `Authorization` header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Resolution
///
/// This layer never rejects a request. It records the outcome in the request
/// extensions and leaves the decision to the route's extractors:
///
/// 1. No header: nothing is recorded and the request is anonymous
/// 2. Valid token: a [`CurrentUser`] is inserted
/// 3. Malformed, forged or expired token: a [`RejectedToken`] carrying the
///    401 error is inserted
///
/// Optional routes ([`crate::api::extractors::Viewer`]) then treat case 3 as
/// anonymous, while authenticated routes answer 401 with the recorded reason.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::api::middleware::auth;
///
/// let app = Router::new()
///     .merge(resource_routes())
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    if !req.headers().contains_key(AUTHORIZATION) {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();

    match resolve(&st, &mut parts).await {
        Ok(user) => {
            parts.extensions.insert(user);
        }
        Err(err) => {
            debug!(error = %err, "Bearer token rejected");
            parts.extensions.insert(RejectedToken(err));
        }
    }

    next.run(Request::from_parts(parts, body)).await
}

async fn resolve(
    st: &AppState,
    parts: &mut axum::http::request::Parts,
) -> Result<CurrentUser, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let claims = st.auth_service.verify_token(&token)?;

    Ok(CurrentUser {
        id: claims.sub,
        role: claims.role,
    })
}
