use crate::dtos::ErrorResponse;
use crate::services::providers::ProviderError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Exact validation message returned when either upload is missing.
pub const MISSING_FILES_MESSAGE: &str = "Both RFQ and Proposal files are required.";

/// Fixed message for request bodies that fail multipart parsing. The parser's
/// own error goes to the operator log only.
pub const MALFORMED_MULTIPART_MESSAGE: &str = "Malformed multipart body.";

/// Generic message for every processing or remote failure. The detailed
/// cause goes to the operator log only.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An internal server error occurred during the compliance check. Check file formats and server logs.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Missing required documents")]
    MissingDocuments,

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::MissingDocuments => {
                (StatusCode::BAD_REQUEST, MISSING_FILES_MESSAGE.to_string())
            }
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::ProviderError(_) | AppError::InternalError(_) | AppError::ConfigError(_) => {
                // Never leak the underlying cause to the client.
                tracing::error!(error = %self, "Compliance check failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}
