pub mod client;
#[cfg(feature = "openai")]
pub(crate) mod media;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "openai")]
mod utils;

pub use client::{
    ChatMessage, ChatModel, Conversation, FunctionCall, FunctionSpec, ModelResponse, OutputSpec,
    Role,
};
#[cfg(feature = "openai")]
pub use openai::{Model as OpenAIModel, OpenAIClient, OpenAIConfig};
