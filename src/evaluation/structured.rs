use tracing::{info, instrument};

use crate::backend::{Conversation, OutputSpec};
use crate::error::{FitcheckError, Result};
use crate::evaluation::Evaluator;
use crate::evaluation::types::{
    EvaluationOutcome, FashionAnalysis, HumanDetection, NO_PERSON_STRUCTURED,
};
use crate::model::ModelOutput;
use crate::normalizer::ImagePayload;
use crate::prompt::{fashion_analysis_structured_prompt, human_detection_structured_prompt};

impl Evaluator {
    /// Evaluate an image with free-text answers parsed against the schemas.
    ///
    /// Only "no person" is reported as an outcome. Model, network and parse failures
    /// are returned as errors for the caller to map.
    #[instrument(
        name = "evaluate_structured_output",
        skip(self, payload),
        fields(mime_type = %payload.mime_type, input_len = payload.bytes.len())
    )]
    pub async fn evaluate_with_structured_output(
        &self,
        payload: ImagePayload,
    ) -> Result<EvaluationOutcome> {
        let image = payload.normalize();

        let detection: HumanDetection = self
            .ask_structured(human_detection_structured_prompt(
                &image,
                &HumanDetection::format_instructions(),
            ))
            .await?;

        if !detection.is_person_in_image {
            info!("No person detected, skipping fashion analysis");
            return Ok(EvaluationOutcome::failure(NO_PERSON_STRUCTURED));
        }

        let analysis: FashionAnalysis = self
            .ask_structured(fashion_analysis_structured_prompt(
                &image,
                &FashionAnalysis::format_instructions(),
            ))
            .await?;

        info!("Structured-output evaluation finished");
        Ok(EvaluationOutcome::analyzed(analysis))
    }

    async fn ask_structured<T: ModelOutput>(&self, conversation: Conversation) -> Result<T> {
        let response = self.model.invoke(&conversation, &OutputSpec::Text).await?;
        let text = response.content.ok_or_else(|| {
            FitcheckError::ParseError("Model returned no text content".to_string())
        })?;
        T::parse_text(&text)
    }
}
