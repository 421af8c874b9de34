use axum::{
    Json,
    extract::{Multipart, State},
};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::evaluation::EvaluationOutcome;
use crate::normalizer::ImagePayload;
use crate::server::{AppState, error::AppError};

const IMAGE_FIELD: &str = "image";

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[instrument(name = "describe_function_calling", skip_all)]
pub(super) async fn describe_function_calling(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationOutcome>, AppError> {
    let payload = read_image(multipart, state.max_upload_bytes).await?;
    let outcome = state
        .evaluator
        .evaluate_with_function_calling(payload)
        .await;
    Ok(Json(outcome))
}

#[instrument(name = "describe_structured_output", skip_all)]
pub(super) async fn describe_structured_output(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationOutcome>, AppError> {
    let payload = read_image(multipart, state.max_upload_bytes).await?;
    let outcome = state
        .evaluator
        .evaluate_with_structured_output(payload)
        .await?;
    Ok(Json(outcome))
}

/// Pull the `image` file field out of the form. Other fields are skipped.
async fn read_image(mut multipart: Multipart, limit: usize) -> Result<ImagePayload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let mime_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if bytes.len() > limit {
            return Err(AppError::TooLarge { limit });
        }

        info!(mime_type = %mime_type, size = bytes.len(), "Received image upload");
        return Ok(ImagePayload::new(mime_type, bytes.to_vec()));
    }

    Err(AppError::MissingImage)
}
