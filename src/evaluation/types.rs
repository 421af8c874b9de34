use fitcheck_derive::ModelOutput;
use serde::{Deserialize, Serialize};

/// Message returned by the function-calling pipeline when no person is found.
pub const NO_PERSON_FUNCTION_CALLING: &str = "Fail to analysis";
/// Message returned by the structured-output pipeline when no person is found.
pub const NO_PERSON_STRUCTURED: &str = "No person detected in the image";
/// Message returned when the model skips the forced fashion-analysis call.
pub const ANALYSIS_MISSING: &str = "Failed to analyze fashion";
/// Prefix for errors folded into an outcome by the function-calling pipeline.
pub const PROCESSING_ERROR_PREFIX: &str = "Error processing image: ";

/// Result of the first stage: is there a clothed person in the picture?
#[derive(ModelOutput, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[llm(name = "detect_human", description = "Detect if there is a human in the image")]
pub struct HumanDetection {
    #[llm(description = "Whether a person is detected in the image")]
    pub is_person_in_image: bool,
}

impl HumanDetection {
    /// Value assumed when the model declines to call `detect_human`.
    pub fn absent() -> Self {
        Self {
            is_person_in_image: false,
        }
    }
}

/// Result of the second stage. All ratings share one scale, 0 to 10.
#[derive(ModelOutput, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[llm(name = "ootd_fashion_analysis", description = "Analyze the fashion in the image")]
pub struct FashionAnalysis {
    #[llm(description = "Description of the overall fashion style")]
    pub summary: String,

    #[llm(description = "Rating for aesthetics from 0-10", minimum = 0, maximum = 10)]
    pub points: f64,

    #[llm(description = "Rating for outfit balance from 0-10", minimum = 0, maximum = 10)]
    pub balance: f64,

    #[llm(description = "Rating for sophistication level from 0-10", minimum = 0, maximum = 10)]
    pub sophistication: f64,

    #[llm(description = "Rating for fashion sense from 0-10", minimum = 0, maximum = 10)]
    pub sense: f64,

    #[llm(description = "List of hashtags that describe the style")]
    pub hashtags: Vec<String>,
}

/// `message` of an outcome: either a human-readable string or the analysis itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomeMessage {
    Analysis(FashionAnalysis),
    Text(String),
}

/// What the HTTP endpoints return: `{ "success": bool, "message": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub success: bool,
    pub message: OutcomeMessage,
}

impl EvaluationOutcome {
    pub fn analyzed(analysis: FashionAnalysis) -> Self {
        Self {
            success: true,
            message: OutcomeMessage::Analysis(analysis),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: OutcomeMessage::Text(message.into()),
        }
    }

    pub fn analysis(&self) -> Option<&FashionAnalysis> {
        match &self.message {
            OutcomeMessage::Analysis(analysis) => Some(analysis),
            OutcomeMessage::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.message {
            OutcomeMessage::Text(text) => Some(text),
            OutcomeMessage::Analysis(_) => None,
        }
    }
}
