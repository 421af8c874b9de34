use thiserror::Error;

/// Error types for the fitcheck crate.
///
/// Image-processing failures never appear here: the normalizer falls back to the
/// original bytes instead of failing. Everything else that can go wrong between the
/// upload and the final outcome is one of these variants.
///
/// # Examples
///
/// ```
/// use fitcheck::{FitcheckError, Result};
///
/// fn check_rating(value: f64) -> Result<()> {
///     if !(0.0..=10.0).contains(&value) {
///         return Err(FitcheckError::ValidationError(format!("rating {value} out of range")));
///     }
///     Ok(())
/// }
///
/// match check_rating(11.0) {
///     Err(FitcheckError::ValidationError(msg)) => assert!(msg.contains("out of range")),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum FitcheckError {
    /// Error interacting with the model provider
    #[error("API error: {0}")]
    ApiError(String),

    /// Model text did not match the declared output format
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Decoded data violates the schema (types, required fields, bounds)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error related to JSON Schema generation or processing
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation timed out
    #[error("Timeout error")]
    Timeout,

    /// HTTP client error (from reqwest)
    #[cfg(feature = "openai")]
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error (from serde_json)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FitcheckError {
    /// Whether the failure happened at or beyond the model boundary
    /// (network, provider, timeout) rather than in local decoding.
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::ApiError(_) | Self::Timeout => true,
            #[cfg(feature = "openai")]
            Self::HttpError(_) => true,
            _ => false,
        }
    }
}

// HttpError and JsonError never compare equal: their sources don't implement PartialEq
impl PartialEq for FitcheckError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ApiError(a), Self::ApiError(b)) => a == b,
            (Self::ParseError(a), Self::ParseError(b)) => a == b,
            (Self::ValidationError(a), Self::ValidationError(b)) => a == b,
            (Self::SchemaError(a), Self::SchemaError(b)) => a == b,
            (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for fitcheck operations.
pub type Result<T> = std::result::Result<T, FitcheckError>;
