use tracing::{debug, error, info, instrument, warn};

use crate::backend::{FunctionSpec, OutputSpec};
use crate::error::Result;
use crate::evaluation::Evaluator;
use crate::evaluation::types::{
    ANALYSIS_MISSING, EvaluationOutcome, FashionAnalysis, HumanDetection,
    NO_PERSON_FUNCTION_CALLING, PROCESSING_ERROR_PREFIX,
};
use crate::model::ModelOutput;
use crate::normalizer::{EncodedImage, ImagePayload};
use crate::prompt::{fashion_analysis_prompt, human_detection_prompt};

impl Evaluator {
    /// Evaluate an image with forced function calls.
    ///
    /// Never returns an error: model, network and decoding failures become
    /// `{ success: false, message: "Error processing image: ..." }`. A model that
    /// skips the `detect_human` call is treated as "no person".
    #[instrument(
        name = "evaluate_function_calling",
        skip(self, payload),
        fields(mime_type = %payload.mime_type, input_len = payload.bytes.len())
    )]
    pub async fn evaluate_with_function_calling(&self, payload: ImagePayload) -> EvaluationOutcome {
        let image = payload.normalize();

        match self.run_function_calling(&image).await {
            Ok(outcome) => {
                info!(success = outcome.success, "Function-calling evaluation finished");
                outcome
            }
            Err(e) => {
                error!(error = %e, "Function-calling evaluation failed");
                EvaluationOutcome::failure(format!("{PROCESSING_ERROR_PREFIX}{e}"))
            }
        }
    }

    async fn run_function_calling(&self, image: &EncodedImage) -> Result<EvaluationOutcome> {
        let detection = self.detect_human_by_function(image).await?;
        if !detection.is_person_in_image {
            info!("No person detected, skipping fashion analysis");
            return Ok(EvaluationOutcome::failure(NO_PERSON_FUNCTION_CALLING));
        }

        match self.analyze_fashion_by_function(image).await? {
            Some(analysis) => Ok(EvaluationOutcome::analyzed(analysis)),
            None => Ok(EvaluationOutcome::failure(ANALYSIS_MISSING)),
        }
    }

    async fn detect_human_by_function(&self, image: &EncodedImage) -> Result<HumanDetection> {
        let output = OutputSpec::FunctionCall(FunctionSpec::for_type::<HumanDetection>()?);
        let response = self
            .model
            .invoke(&human_detection_prompt(image), &output)
            .await?;

        match response.function_call {
            Some(call) => {
                debug!(function = %call.name, "Decoding human detection arguments");
                HumanDetection::from_arguments(&call.arguments)
            }
            None => {
                warn!("Model did not call detect_human, assuming no person");
                Ok(HumanDetection::absent())
            }
        }
    }

    async fn analyze_fashion_by_function(
        &self,
        image: &EncodedImage,
    ) -> Result<Option<FashionAnalysis>> {
        let output = OutputSpec::FunctionCall(FunctionSpec::for_type::<FashionAnalysis>()?);
        let response = self
            .model
            .invoke(&fashion_analysis_prompt(image), &output)
            .await?;

        match response.function_call {
            Some(call) => {
                debug!(function = %call.name, "Decoding fashion analysis arguments");
                FashionAnalysis::from_arguments(&call.arguments).map(Some)
            }
            None => {
                warn!("Model did not call ootd_fashion_analysis");
                Ok(None)
            }
        }
    }
}
