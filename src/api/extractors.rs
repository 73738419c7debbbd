//! Request extractors for identity, capabilities and validated input.
//!
//! Identity is resolved once per request by [`crate::api::middleware::auth`];
//! these extractors only read what it left in the request extensions.

use std::convert::Infallible;
use std::marker::PhantomData;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::domain::access::Capability;
use crate::domain::entities::Role;
use crate::error::AppError;

/// The authenticated caller.
///
/// Rejects with 401 when the request carried no valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
}

/// Left in the extensions when a bearer token was presented but rejected.
#[derive(Debug, Clone)]
pub struct RejectedToken(pub AppError);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(*user);
        }

        Err(match parts.extensions.get::<RejectedToken>() {
            Some(RejectedToken(err)) => err.clone(),
            None => AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing" }),
            ),
        })
    }
}

/// The caller if authenticated, otherwise anonymous. Never rejects.
///
/// An invalid or expired token counts as anonymous.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<CurrentUser>);

impl Viewer {
    pub fn role(&self) -> Option<Role> {
        self.0.map(|user| user.role)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Viewer(parts.extensions.get::<CurrentUser>().copied()))
    }
}

/// Names the capability an [`Authorized`] extractor checks.
pub trait Requirement: Send + Sync + 'static {
    const CAPABILITY: Capability;
}

macro_rules! requirement {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $name;

            impl Requirement for $name {
                const CAPABILITY: Capability = Capability::$name;
            }
        )+
    };
}

requirement!(
    ManageListings,
    LikeListings,
    RequestUploadUrl,
    ReadConsultations,
    ManageConsultations,
);

/// An authenticated caller whose role grants `R::CAPABILITY`.
///
/// Rejects with 401 when unauthenticated and 403 when the role lacks the
/// capability, before the handler body runs.
#[derive(Debug)]
pub struct Authorized<R: Requirement> {
    pub user: CurrentUser,
    _requirement: PhantomData<R>,
}

impl<S, R> FromRequestParts<S> for Authorized<R>
where
    S: Send + Sync,
    R: Requirement,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if !user.role.grants(R::CAPABILITY) {
            return Err(AppError::forbidden(
                "Forbidden",
                json!({ "required": R::CAPABILITY.as_str() }),
            ));
        }

        Ok(Self {
            user,
            _requirement: PhantomData,
        })
    }
}

/// JSON body deserialized and then checked against its `Validate` schema.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid request body",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string deserialized and then checked against its `Validate` schema.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid query parameters",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}
