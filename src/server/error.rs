use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::error::FitcheckError;

/// Failures that end a request before a normal outcome can be returned.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing multipart file field 'image'")]
    MissingImage,

    #[error("Uploaded image exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Invalid multipart request: {message}")]
    Multipart { status: StatusCode, message: String },

    #[error(transparent)]
    Evaluation(#[from] FitcheckError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingImage => StatusCode::BAD_REQUEST,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Multipart { status, .. } => *status,
            Self::Evaluation(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            Self::Evaluation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
