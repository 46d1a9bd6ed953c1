use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use evaluator_common::error::CommonError;
use evaluator_common::generation::GenerationError;

pub const INVALID_INPUT_MESSAGE: &str = "Please provide a company URL";
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse AI response. Please try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to evaluate company. Please try again.";

/// Startup and configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Common(#[from] CommonError),
}

/// Failures of a single evaluation request.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    #[error("missing or empty company URL")]
    InvalidInput,

    #[error("model reply is not valid JSON: {0}")]
    MalformedReply(#[source] serde_json::Error),

    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl EvaluateError {
    pub fn status(&self) -> StatusCode {
        match self {
            EvaluateError::InvalidInput => StatusCode::BAD_REQUEST,
            EvaluateError::MalformedReply(_) | EvaluateError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the caller. Internal detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            EvaluateError::InvalidInput => INVALID_INPUT_MESSAGE,
            EvaluateError::MalformedReply(_) => PARSE_FAILURE_MESSAGE,
            EvaluateError::Generation(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl IntoResponse for EvaluateError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "evaluation failed");
        }
        (status, axum::Json(json!({ "error": self.user_message() }))).into_response()
    }
}
