//! API error type shared by the REST handlers
//!
//! An unknown coupon code is deliberately not here: it is reported
//! through the cart view-model so the client can show it inline rather
//! than as a failed request. Removing or resizing an absent cart line is
//! a silent no-op, not an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("plant {0} is not in the catalog")]
    UnknownPlant(u32),

    #[error("cart is empty")]
    EmptyCart,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownPlant(_) => StatusCode::NOT_FOUND,
            ApiError::EmptyCart => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
