use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use tracing::warn;

use crate::auth::token::TokenKind;
use crate::error::{AppError, AuthError};
use crate::AppState;

/// The caller of a protected route, taken from a valid bearer access token.
/// Extraction fails with 401 before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

impl AuthenticatedUser {
    fn from_request_sync(req: &HttpRequest) -> Result<Self, AppError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::InternalError("application state not configured".into()))?;

        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = state.auth_service.tokens().validate(token).map_err(|e| {
            warn!("Rejected bearer token on {}: {}", req.path(), e);
            e
        })?;
        claims.require_kind(TokenKind::Access)?;

        Ok(Self {
            user_id: claims.user_id()?,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_sync(req))
    }
}
