//! API error handling
//!
//! Domain errors map onto three HTTP classes: validation failures return
//! 422 naming the offending field or key, configuration gaps return 409
//! naming the missing mapping, and integrity failures return 500 with a
//! generic message while the detail goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_contract::ContractError;
use domain_ledger::LedgerError;
use domain_pricing::PricingError;
use domain_receipts::ReceiptError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<ContractError> for ApiError {
    fn from(err: ContractError) -> Self {
        match err {
            // Illegal transitions are conflicts with the current state,
            // not malformed input.
            ContractError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
            ContractError::Money(_) | ContractError::Temporal(_) => {
                ApiError::Validation(err.to_string())
            }
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<ReceiptError> for ApiError {
    fn from(err: ReceiptError) -> Self {
        match err {
            ReceiptError::MissingRowMapping { .. } | ReceiptError::BranchNotConfigured(_) => {
                ApiError::Conflict(err.to_string())
            }
            ReceiptError::Ledger(inner) => ApiError::from(inner),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        // A ledger failure after validation is an integrity problem: the
        // caller gets no internals, the log gets everything.
        ApiError::Internal(err.to_string())
    }
}
