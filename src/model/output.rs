use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{FitcheckError, Result};
use crate::schema::{self, SchemaType};

/// The `ModelOutput` trait ties a Rust type to its canonical JSON Schema and decodes
/// model replies into it.
///
/// Both encodings of a reply go through the same schema:
///
/// - function-calling: the `arguments` string of the forced function call
///   ([`ModelOutput::from_arguments`])
/// - structured output: free text that should contain the JSON object, possibly inside
///   a markdown code fence ([`ModelOutput::parse_text`])
///
/// It is implemented for every type that has a schema and is (de)serializable, which is
/// what `#[derive(ModelOutput)]` provides.
///
/// ```
/// use fitcheck::ModelOutput;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(ModelOutput, Serialize, Deserialize, Debug)]
/// struct Score {
///     #[llm(description = "Score from 0-10", minimum = 0, maximum = 10)]
///     value: f64,
/// }
///
/// let score = Score::parse_text("```json\n{\"value\": 7}\n```").unwrap();
/// assert_eq!(score.value, 7.0);
/// assert!(Score::parse_text("{\"value\": 12}").is_err());
/// ```
pub trait ModelOutput: SchemaType + DeserializeOwned + Serialize {
    /// Check this value against the type's schema.
    ///
    /// Serde guarantees the shape; this catches what types alone don't express,
    /// such as numeric bounds.
    fn validate(&self) -> Result<()> {
        let value = serde_json::to_value(self)?;
        schema::validate_value(Self::schema().to_json(), &value)
    }

    /// Validate a raw JSON value against the schema and deserialize it.
    fn from_json_value(value: Value) -> Result<Self>
    where
        Self: Sized,
    {
        schema::validate_value(Self::schema().to_json(), &value)?;
        let parsed: Self = serde_json::from_value(value).map_err(|e| {
            FitcheckError::ValidationError(format!("Failed to deserialize response: {e}"))
        })?;
        Ok(parsed)
    }

    /// Decode the JSON-encoded arguments of a function call.
    fn from_arguments(arguments: &str) -> Result<Self>
    where
        Self: Sized,
    {
        let value: Value = serde_json::from_str(arguments).map_err(|e| {
            error!(error = %e, arguments = %arguments, "Function arguments are not valid JSON");
            FitcheckError::ParseError(format!(
                "Failed to parse function arguments: {e}\nArguments: {arguments}"
            ))
        })?;
        Self::from_json_value(value)
    }

    /// Decode a free-text reply produced under [`ModelOutput::format_instructions`].
    fn parse_text(text: &str) -> Result<Self>
    where
        Self: Sized,
    {
        let json = extract_json_from_markdown(text);
        debug!(text_len = text.len(), json_len = json.len(), "Parsing structured text");
        let value: Value = serde_json::from_str(&json).map_err(|e| {
            error!(error = %e, content = %text, "Model text is not valid JSON");
            FitcheckError::ParseError(format!(
                "Failed to parse model output: {e}\nText: {text}"
            ))
        })?;
        Self::from_json_value(value)
    }

    /// Format instruction describing this type, for embedding in a prompt.
    fn format_instructions() -> String {
        schema::format_instructions(&Self::schema())
    }
}

impl<T: SchemaType + DeserializeOwned + Serialize> ModelOutput for T {}

/// Extract JSON from markdown code blocks if present, otherwise return the content as-is.
///
/// Models often wrap JSON replies in ```json ... ``` or ``` ... ``` fences, sometimes
/// with a sentence before or after.
pub fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    if let Some(fence_start) = trimmed.find("```") {
        let after_fence = &trimmed[fence_start + 3..];
        // Skip the language tag on the opening line
        if let Some(newline) = after_fence.find('\n') {
            let body = &after_fence[newline + 1..];
            if let Some(end_idx) = body.find("```") {
                return body[..end_idx].trim().to_string();
            }
        }
    }

    trimmed.to_string()
}
