//! fitcheck: outfit evaluation on top of a multimodal LLM
//!
//! # Overview
//!
//! fitcheck takes an uploaded photo, shrinks it, and asks a hosted model two questions
//! in sequence: is there a clothed person in it, and if so, how good is the outfit?
//! The answer to the second question is a [`FashionAnalysis`] with a Korean summary,
//! four ratings on a 0-10 scale and a list of hashtags.
//!
//! Key pieces:
//! - [`normalizer`]: resize + JPEG re-encode to a data URI, with a raw fallback
//! - [`prompt`]: the fixed two-message conversations for each stage
//! - [`schema`] and `#[derive(ModelOutput)]`: one canonical schema per answer type,
//!   used both as function parameters and as a text format instruction
//! - [`ChatModel`]: the model boundary, implemented by [`OpenAIClient`]
//! - [`Evaluator`]: the two pipeline variants
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use fitcheck::{Evaluator, ImagePayload, OpenAIClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAIClient::new("your-openai-api-key")?.build();
//!     let evaluator = Evaluator::new(Arc::new(client));
//!
//!     let bytes = std::fs::read("outfit.jpg")?;
//!     let outcome = evaluator
//!         .evaluate_with_function_calling(ImagePayload::new("image/jpeg", bytes))
//!         .await;
//!
//!     println!("{}", serde_json::to_string_pretty(&outcome)?);
//!     Ok(())
//! }
//! ```
extern crate self as fitcheck;

mod backend;
#[cfg(feature = "server")]
pub mod config;
mod error;
#[cfg(feature = "derive")]
pub mod evaluation;
#[cfg(feature = "logging")]
pub mod logging;
pub mod model;
pub mod normalizer;
pub mod prompt;
pub mod schema;
#[cfg(feature = "server")]
pub mod server;

// Re-exports for convenience
pub use backend::{
    ChatMessage, ChatModel, Conversation, FunctionCall, FunctionSpec, ModelResponse, OutputSpec,
    Role,
};
pub use error::{FitcheckError, Result};
pub use model::ModelOutput;
pub use normalizer::{EncodedImage, ImagePayload};
pub use schema::{Schema, SchemaBuilder, SchemaType};

#[cfg(feature = "derive")]
pub use evaluation::{
    EvaluationOutcome, Evaluator, FashionAnalysis, HumanDetection, OutcomeMessage,
};

#[cfg(feature = "openai")]
pub use backend::{OpenAIClient, OpenAIConfig, OpenAIModel};

#[cfg(feature = "derive")]
pub use fitcheck_derive::ModelOutput;
