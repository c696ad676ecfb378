//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::CartError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// No usable identity on the request.
    Unauthorized(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Cart domain error.
    Cart(CartError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Cart(err) => cart_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn cart_error_to_response(err: CartError) -> (StatusCode, String) {
    match &err {
        CartError::InvalidQuantity { .. } | CartError::InvalidPrice { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        CartError::ItemNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        CartError::Store(store_err) => {
            // Log the store detail, return a generic body: connection
            // strings and SQL fragments must not leak to clients.
            tracing::error!(error = %store_err, "cart store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError::Cart(err)
    }
}
