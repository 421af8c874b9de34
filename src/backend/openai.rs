use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::backend::media::{OpenAIMessageContent, build_openai_message_content};
use crate::backend::utils::{check_response_status, handle_http_error};
use crate::backend::{
    ChatModel, Conversation, FunctionCall, FunctionSpec, ModelResponse, OutputSpec,
};
use crate::error::{FitcheckError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI models available for completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    Gpt4OMini,
    Gpt4O,
    Gpt41Mini,
    /// Any other model identifier, passed through unchanged
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4OMini => "gpt-4o-mini",
            Model::Gpt4O => "gpt-4o",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Custom(name) => name,
        }
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Model::from(name.as_str())
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        match name {
            "gpt-4o-mini" => Model::Gpt4OMini,
            "gpt-4o" => Model::Gpt4O,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            other => Model::Custom(other.to_string()),
        }
    }
}

/// Configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: Model,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
}

/// OpenAI chat-completions client
pub struct OpenAIClient {
    config: OpenAIConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: OpenAIMessageContent,
}

#[derive(Debug, Serialize)]
struct FunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<FunctionDef<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<Value>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ResponseFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    function_call: Option<ResponseFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

impl OpenAIClient {
    /// Create a new OpenAI client with default configuration
    #[instrument(name = "openai_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FitcheckError::ConfigError(
                "OpenAI API key must not be empty".to_string(),
            ));
        }
        info!("Creating new OpenAI client");
        trace!("API key length: {}", api_key.len());

        let config = OpenAIConfig {
            api_key,
            model: Model::Gpt4OMini,
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.0,
            max_tokens: None,
            timeout: None,
        };

        debug!("OpenAI client created with default configuration");
        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create a client from `OPEN_AI_TOKEN` (or `OPENAI_API_KEY`).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPEN_AI_TOKEN")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                FitcheckError::ConfigError("OPEN_AI_TOKEN is not set".to_string())
            })?;
        Self::new(api_key)
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: impl Into<Model> + std::fmt::Debug) -> Self {
        let model = model.into();
        debug!(previous_model = ?self.config.model, new_model = ?model, "Setting OpenAI model");
        self.config.model = model;
        self
    }

    /// Set the temperature (0.0 to 2.0, lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = temp;
        self
    }

    /// Set the maximum tokens to generate
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(previous_max = ?self.config.max_tokens, new_max = max, "Setting max_tokens");
        // Ensure max_tokens is at least 1 to avoid API errors
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Point the client at another OpenAI-compatible endpoint.
    #[instrument(skip(self))]
    pub fn base_url(mut self, base_url: impl Into<String> + std::fmt::Debug) -> Self {
        let base_url = base_url.into();
        debug!(previous = %self.config.base_url, new = %base_url, "Setting base_url");
        self.config.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the timeout for HTTP requests.
    ///
    /// Applies to each request as a whole; exceeding it yields [`FitcheckError::Timeout`].
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(
            previous_timeout = ?self.config.timeout,
            new_timeout = ?timeout,
            "Setting timeout"
        );
        self.config.timeout = Some(timeout);
        self
    }

    /// Build the client (chainable after configuration)
    #[instrument(skip(self))]
    pub fn build(mut self) -> Self {
        info!(
            model = %self.config.model.as_str(),
            temperature = self.config.temperature,
            max_tokens = ?self.config.max_tokens,
            timeout = ?self.config.timeout,
            "OpenAI client configuration complete"
        );

        let mut client_builder = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        self.client = client_builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build reqwest client with timeout, using default");
            reqwest::Client::new()
        });

        self
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn build_request<'a>(
        &'a self,
        conversation: &Conversation,
        output: &'a OutputSpec,
    ) -> ChatCompletionRequest<'a> {
        let messages = conversation
            .messages()
            .iter()
            .map(|msg| ChatMessage {
                role: msg.role.as_str(),
                content: build_openai_message_content(msg),
            })
            .collect();

        let (functions, function_call) = match output {
            OutputSpec::FunctionCall(FunctionSpec {
                name,
                description,
                parameters,
            }) => (
                Some(vec![FunctionDef {
                    name,
                    description,
                    parameters,
                }]),
                Some(json!({ "name": name })),
            ),
            OutputSpec::Text => (None, None),
        };

        ChatCompletionRequest {
            model: self.config.model.as_str(),
            messages,
            functions,
            function_call,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAIClient {
    #[instrument(
        name = "openai_invoke",
        skip(self, conversation, output),
        fields(
            model = %self.config.model.as_str(),
            messages = conversation.len()
        )
    )]
    async fn invoke(
        &self,
        conversation: &Conversation,
        output: &OutputSpec,
    ) -> Result<ModelResponse> {
        let request = self.build_request(conversation, output);

        match output {
            OutputSpec::FunctionCall(spec) => {
                debug!(function = %spec.name, "Sending function-calling request to OpenAI API")
            }
            OutputSpec::Text => debug!("Sending text request to OpenAI API"),
        }
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "OpenAI"))?;

        let response = check_response_status(response, "OpenAI").await?;

        debug!("Successfully received response from OpenAI");
        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| handle_http_error(e, "OpenAI"))?;

        let Some(choice) = completion.choices.into_iter().next() else {
            error!("OpenAI returned empty choices array");
            return Err(FitcheckError::ApiError(
                "No completion choices returned".to_string(),
            ));
        };
        trace!(finish_reason = ?choice.finish_reason, "Completion finish reason");

        let function_call = choice.message.function_call.map(|call| {
            debug!(
                function_name = %call.name,
                args_len = call.arguments.len(),
                "Function call received from OpenAI"
            );
            FunctionCall {
                name: call.name,
                arguments: call.arguments,
            }
        });

        Ok(ModelResponse {
            content: choice.message.content,
            function_call,
        })
    }
}
