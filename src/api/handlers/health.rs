//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database unreachable
///
/// Providers are reported as `ok` or `disabled` and never degrade the status;
/// a service without SMS still serves listings.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok" },
///     "sms": { "status": "disabled", "message": "SOLAPI_* not configured" },
///     "social_login": { "status": "ok" },
///     "storage": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let healthy = database.status == "ok";

    let providers = state.providers;
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            sms: provider_status(providers.sms, "SOLAPI_*"),
            social_login: provider_status(providers.social_login, "KAKAO_*"),
            storage: provider_status(providers.storage, "AWS_*"),
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.db.as_ref())
        .await
    {
        Ok(_) => CheckStatus {
            status: "ok".to_string(),
            message: None,
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {}", e)),
        },
    }
}

fn provider_status(configured: bool, settings: &str) -> CheckStatus {
    if configured {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "disabled".to_string(),
            message: Some(format!("{settings} not configured")),
        }
    }
}
