//! Request identity extraction.
//!
//! Authentication happens upstream: the gateway verifies the caller's
//! credentials and forwards the resolved identity in the `x-user-id`
//! header. This service trusts that header and performs no verification
//! of its own, so it must never be exposed without the gateway in front.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::UserId;

use crate::error::ApiError;

/// Name of the header carrying the authenticated user identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user for a request.
///
/// Extracting this from a request without a parseable `x-user-id` header
/// rejects it with 401 before the handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized(format!("Missing {USER_ID_HEADER} header")))?;

        let user_id = value
            .to_str()
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(|| ApiError::Unauthorized(format!("Invalid {USER_ID_HEADER} header")))?;

        Ok(AuthUser(UserId::new(user_id)))
    }
}
