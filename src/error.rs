//! Application error type and its HTTP mapping.
//!
//! Every failure that can cross the HTTP boundary is an [`AppError`]. Handlers,
//! services and repositories all return `Result<_, AppError>`, and axum turns the
//! error into a response with a stable JSON shape:
//!
//! ```json
//! { "error": { "code": "validation_error", "message": "...", "details": { "fields": { ... } } } }
//! ```
//!
//! `Upstream` and `Internal` details are logged server-side and never sent to
//! the client.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Forbidden { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Expired { message: String, details: Value },
    #[error("{message}")]
    Upstream { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Builds the client-facing payload.
    ///
    /// Upstream and internal failures are logged here with their full details;
    /// the payload carries the message only.
    pub fn to_error_info(&self) -> (StatusCode, ErrorInfo) {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message.clone(),
                details.clone(),
            ),
            AppError::Unauthorized { message, details } => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                message.clone(),
                details.clone(),
            ),
            AppError::Forbidden { message, details } => (
                StatusCode::FORBIDDEN,
                "forbidden",
                message.clone(),
                details.clone(),
            ),
            AppError::NotFound { message, details } => (
                StatusCode::NOT_FOUND,
                "not_found",
                message.clone(),
                details.clone(),
            ),
            AppError::Conflict { message, details } => (
                StatusCode::CONFLICT,
                "conflict",
                message.clone(),
                details.clone(),
            ),
            AppError::Expired { message, details } => {
                (StatusCode::GONE, "expired", message.clone(), details.clone())
            }
            AppError::Upstream { message, details } => {
                tracing::error!(%message, %details, "Upstream provider call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    message.clone(),
                    json!({}),
                )
            }
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    json!({}),
                )
            }
        };

        (
            status,
            ErrorInfo {
                code,
                message,
                details,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.to_error_info();
        let mut response = (status, Json(ErrorBody { error })).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return AppError::not_found("Record not found", json!({}));
        }

        if let Some(db) = e.as_database_error() {
            let constraint = db.constraint().map(str::to_string);
            match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    return AppError::conflict(
                        "Unique constraint violation",
                        json!({ "constraint": constraint }),
                    );
                }
                sqlx::error::ErrorKind::CheckViolation => {
                    return AppError::bad_request(
                        "Value violates a data constraint",
                        json!({ "constraint": constraint }),
                    );
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return AppError::not_found(
                        "Referenced record not found",
                        json!({ "constraint": constraint }),
                    );
                }
                _ => {}
            }
        }

        AppError::internal("Database error", json!({ "source": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": validation_fields(&errors) }),
        )
    }
}

/// Flattens validator output into `{ "field": ["message", ...] }`.
///
/// Nested structs and lists are addressed with dotted / indexed paths.
fn validation_fields(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    collect_fields(errors, None, &mut fields);
    Value::Object(fields)
}

fn collect_fields(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Map<String, Value>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = list
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .map(Value::String)
                    .collect();
                out.insert(path, Value::Array(messages));
            }
            ValidationErrorsKind::Struct(inner) => collect_fields(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_fields(inner, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}
