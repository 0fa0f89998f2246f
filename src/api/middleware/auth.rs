//! Bearer token authentication middleware and extractors.
//!
//! The [`identify`] layer runs over the whole `/api` tree: when an
//! `Authorization: Bearer <token>` header is present it must resolve to
//! a live token, and the owning user is stashed in request extensions.
//! Handlers then declare their requirement through the extractors:
//! [`CurrentUser`] rejects anonymous callers with 401, [`MaybeUser`]
//! accepts them. This keeps mixed-auth paths (public GET, protected
//! POST on the same route) in one router.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{domain::entities::User, error::AppError, state::AppState};

/// Resolves the Bearer token (if any) to a user.
///
/// # Errors
///
/// Returns `401 Unauthorized` when a token is presented but unknown or
/// revoked. Requests without an Authorization header pass through
/// anonymously.
pub async fn identify(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(&mut parts, &()).await {
        let user = st.auth_service.authenticate(&token).await?;
        parts.extensions.insert(CurrentUser(user));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Extractor for endpoints that require authentication.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authentication credentials were not provided" }),
            )
        })
    }
}

/// Extractor for endpoints that serve both anonymous and authenticated
/// callers.
#[derive(Debug)]
pub struct MaybeUser(pub Option<User>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            parts.extensions.get::<CurrentUser>().map(|c| c.0.clone()),
        ))
    }
}
