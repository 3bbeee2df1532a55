//! REST error mapping for the calculator module.

use axum::Json;
use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::error::DomainError;

use super::dto::ErrorResponse;

/// Message for request bodies that are not a valid calculation request.
pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";

/// Message for every calculation failure unless details are exposed.
pub const EXPRESSION_NOT_VALID: &str = "Expression is not valid";

/// Status code and JSON envelope returned by the handler on failure.
pub type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Errors surfaced by the REST layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The body is not JSON of the shape `{"expression": "<string>"}`.
    #[error("Invalid request format: {0}")]
    InvalidRequestFormat(#[source] serde_json::Error),

    /// The expression exceeds the configured length guard.
    #[error("Expression is longer than {limit} characters")]
    ExpressionTooLong { limit: usize },

    /// The calculation itself failed.
    #[error(transparent)]
    Calculation(#[from] DomainError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequestFormat(_) => StatusCode::BAD_REQUEST,
            Self::ExpressionTooLong { .. } | Self::Calculation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    /// Message placed in the `error` field.
    ///
    /// Calculation failures collapse to [`EXPRESSION_NOT_VALID`] unless
    /// `expose_details` is set.
    #[must_use]
    pub fn message(&self, expose_details: bool) -> String {
        match self {
            Self::InvalidRequestFormat(_) => INVALID_REQUEST_FORMAT.to_owned(),
            Self::ExpressionTooLong { .. } | Self::Calculation(_) if expose_details => {
                self.to_string()
            }
            Self::ExpressionTooLong { .. } | Self::Calculation(_) => {
                EXPRESSION_NOT_VALID.to_owned()
            }
        }
    }

    /// Logs the error and renders the response pair.
    #[must_use]
    pub fn into_reply(self, expose_details: bool) -> ErrorReply {
        match &self {
            Self::InvalidRequestFormat(e) => {
                tracing::warn!(error = %e, "Rejected malformed calculate request");
            }
            Self::ExpressionTooLong { limit } => {
                tracing::debug!(limit, "Rejected oversized expression");
            }
            Self::Calculation(e) => {
                tracing::debug!(code = e.code(), error = %e, "Expression is not valid");
            }
        }

        (
            self.status(),
            Json(ErrorResponse::new(self.message(expose_details))),
        )
    }
}
