//! The two-stage evaluation pipeline: detect a clothed person, then (only if one was
//! found) ask for a fashion analysis.
//!
//! Two variants share the same branch structure but differ in how the model is asked
//! to answer and in how failures reach the caller:
//!
//! | variant | model mode | errors |
//! |---|---|---|
//! | [`Evaluator::evaluate_with_function_calling`] | forced function call | folded into a `success: false` outcome |
//! | [`Evaluator::evaluate_with_structured_output`] | free text + format instruction | returned as `Err` |

mod function_calling;
mod structured;
pub mod types;

use std::sync::Arc;

use crate::backend::ChatModel;

pub use types::{
    ANALYSIS_MISSING, EvaluationOutcome, FashionAnalysis, HumanDetection,
    NO_PERSON_FUNCTION_CALLING, NO_PERSON_STRUCTURED, OutcomeMessage, PROCESSING_ERROR_PREFIX,
};

/// Runs evaluation pipelines against an injected model.
///
/// Cheap to clone; every request can use its own clone.
#[derive(Clone)]
pub struct Evaluator {
    model: Arc<dyn ChatModel>,
}

impl Evaluator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}
