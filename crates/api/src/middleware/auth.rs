//! Request authentication extractors.
//!
//! [`AuthUser`] rejects with 401 when the `Authorization` header is missing or
//! the bearer token is invalid. [`OptionalAuthUser`] never rejects; handlers
//! that behave differently for signed-in users (e.g. discovery excluding the
//! caller's own listings) use it instead.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lendly_core::error::CoreError;
use lendly_core::types::DbId;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user extracted from a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
}

/// Pull the bearer token out of the `Authorization` header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            CoreError::Unauthorized("Missing or malformed Authorization header".to_string())
        })?;

        let claims = jwt::validate_token(token, &state.config.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// Like [`AuthUser`] but never rejects; yields `None` for anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = bearer_token(parts)
            .and_then(|token| jwt::validate_token(token, &state.config.jwt).ok())
            .map(|claims| AuthUser {
                user_id: claims.sub,
            });
        Ok(OptionalAuthUser(user))
    }
}
