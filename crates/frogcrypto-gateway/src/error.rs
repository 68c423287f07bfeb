// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of service errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use frogcrypto_core::FrogError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
    /// Epoch milliseconds at which a cooled-down feed can be polled again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_eligible_at: Option<i64>,
}

/// A [`FrogError`] returned from a handler.
#[derive(Debug)]
pub struct ApiError(pub FrogError);

impl From<FrogError> for ApiError {
    fn from(error: FrogError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(FrogError::BadRequest(rejection.body_text()))
    }
}

/// HTTP status for each error kind.
pub fn status_for(error: &FrogError) -> StatusCode {
    match error {
        FrogError::Authentication(_) | FrogError::BadRequest(_) => StatusCode::BAD_REQUEST,
        FrogError::Forbidden(_)
        | FrogError::FeedInactive { .. }
        | FrogError::CooldownNotElapsed { .. } => StatusCode::FORBIDDEN,
        FrogError::FeedNotFound { .. } | FrogError::ItemPoolExhausted { .. } => {
            StatusCode::NOT_FOUND
        }
        FrogError::LockContention { .. } => StatusCode::TOO_MANY_REQUESTS,
        FrogError::Storage { .. }
        | FrogError::DataIntegrity(_)
        | FrogError::Config(_)
        | FrogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let next_eligible_at = match &self.0 {
            FrogError::CooldownNotElapsed { next_eligible_at } => Some(*next_eligible_at),
            _ => None,
        };
        // Internals stay in the logs.
        let error = if self.0.is_expected() {
            self.0.to_string()
        } else {
            "internal server error".to_string()
        };
        (
            status,
            Json(ErrorResponse {
                error,
                next_eligible_at,
            }),
        )
            .into_response()
    }
}
