//! HTTP boundary: multipart upload in, JSON evaluation out.

mod error;
mod handlers;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::evaluation::Evaluator;

pub use error::AppError;

/// Headroom for multipart boundaries and headers on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Evaluator,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(evaluator: Evaluator, max_upload_bytes: usize) -> Self {
        Self {
            evaluator,
            max_upload_bytes,
        }
    }
}

/// Build the service router.
///
/// Routes:
/// * `POST /describe-function-calling`
/// * `POST /describe-structed-output`
/// * `GET /health`
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/describe-function-calling",
            post(handlers::describe_function_calling),
        )
        .route(
            "/describe-structed-output",
            post(handlers::describe_structured_output),
        )
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
