//! Handlers for registration, login and social login.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use tracing::warn;

use crate::api::dto::auth::{
    LoginRequest, LoginResponse, RegisterRequest, SocialCallbackQuery, UserResponse,
};
use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a password account.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .auth_service
        .register(payload.email, payload.name, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Response
///
/// ```json
/// { "accessToken": "eyJhbGciOiJIUzI1NiJ9..." }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized for an unknown email, a social-only account or a
/// wrong password. The three cases are indistinguishable.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let access_token = state
        .auth_service
        .login(&payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse { access_token }))
}

/// Returns the caller's profile.
///
/// # Endpoint
///
/// `GET /auth/me`
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid token.
/// Returns 404 Not Found if the account no longer exists.
pub async fn me_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth_service.me(user.id).await?;
    Ok(Json(user.into()))
}

/// Starts Kakao login by redirecting to the provider's consent page.
///
/// # Endpoint
///
/// `GET /auth/kakao`
///
/// # Errors
///
/// Returns 502 Bad Gateway if social login is not configured.
pub async fn kakao_login_handler(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let url = state.auth_service.social_login_url()?;
    Ok(Redirect::to(&url))
}

/// Completes Kakao login.
///
/// # Endpoint
///
/// `GET /auth/kakao/callback?code=...`
///
/// # Redirects
///
/// Always answers 303 See Other so the browser lands back on the frontend:
///
/// - success: `{origin}/auth/callback?token=<jwt>`
/// - any failure: `{origin}/login?error=social_login_failed`
pub async fn kakao_callback_handler(
    State(state): State<AppState>,
    Query(query): Query<SocialCallbackQuery>,
) -> Redirect {
    let origin = state.frontend_origin.trim_end_matches('/');

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        warn!(provider_error = ?query.error, "Social login callback without code");
        return Redirect::to(&format!("{origin}/login?error=social_login_failed"));
    };

    match state.auth_service.handle_social_login(&code).await {
        Ok(token) => Redirect::to(&format!("{origin}/auth/callback?token={token}")),
        Err(e) => {
            warn!(error = %e, "Social login failed");
            Redirect::to(&format!("{origin}/login?error=social_login_failed"))
        }
    }
}
