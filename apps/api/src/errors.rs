use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the template store, renderer, and contract validator.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Template '{name}' not found")]
    NotFound { name: String },

    #[error("Template '{template}' requires placeholder '{placeholder}' but no value was supplied")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Value for placeholder '{placeholder}' of template '{template}' contains placeholder token '{token}'")]
    InvalidValue {
        template: String,
        placeholder: String,
        token: String,
    },

    #[error("Template '{template}' left unresolved token '{token}' after rendering")]
    UnexpectedToken { template: String, token: String },

    #[error("Output violates the {contract} contract: {reason}")]
    ContractViolation {
        contract: &'static str,
        reason: String,
    },

    #[error("Template '{template}' body does not match its declared placeholders: {detail}")]
    TemplateMismatch { template: String, detail: String },

    #[error("Failed to read template file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Prompt(e) => match e {
                PromptError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
                PromptError::MissingPlaceholder { .. } => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_PLACEHOLDER",
                    e.to_string(),
                ),
                PromptError::InvalidValue { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_PLACEHOLDER_VALUE",
                    e.to_string(),
                ),
                PromptError::ContractViolation { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "CONTRACT_VIOLATION",
                    e.to_string(),
                ),
                PromptError::UnexpectedToken { .. } => {
                    tracing::error!("Render error: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UNEXPECTED_TOKEN",
                        e.to_string(),
                    )
                }
                PromptError::TemplateMismatch { .. } | PromptError::Io { .. } => {
                    tracing::error!("Template packaging error: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "TEMPLATE_ERROR",
                        "A template packaging error occurred".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
