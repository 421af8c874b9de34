use async_trait::async_trait;
use serde_json::Value;

use crate::error::{FitcheckError, Result};
use crate::normalizer::EncodedImage;
use crate::schema::SchemaType;

/// Who a message is from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// A single message sent to the model. User messages may carry one inline image,
/// which is placed before the text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub image: Option<EncodedImage>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            image: None,
        }
    }

    pub fn user_with_image(image: EncodedImage, content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            image: Some(image),
        }
    }
}

/// Ordered list of messages for one model invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Declaration of the callable the model is forced to invoke.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl FunctionSpec {
    /// Derive the function declaration from a type's canonical schema.
    ///
    /// The schema name becomes the function name and the schema description the
    /// function description.
    pub fn for_type<T: SchemaType>() -> Result<Self> {
        let schema = T::schema();
        let name = T::schema_name().ok_or_else(|| {
            FitcheckError::SchemaError(format!(
                "{} has no schema name to use as a function name",
                std::any::type_name::<T>()
            ))
        })?;
        let description = schema.description().unwrap_or_default().to_string();

        let mut parameters = schema.to_json().clone();
        if let Value::Object(map) = &mut parameters {
            map.remove("title");
            map.remove("description");
        }

        Ok(Self {
            name,
            description,
            parameters,
        })
    }
}

/// What kind of answer the model is asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputSpec {
    /// Force a call to exactly this function.
    FunctionCall(FunctionSpec),
    /// Free text; any format instruction lives in the conversation itself.
    Text,
}

/// Function call returned by the model
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// Raw model reply, before any decoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelResponse {
    pub content: Option<String>,
    pub function_call: Option<FunctionCall>,
}

impl ModelResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            function_call: None,
        }
    }

    pub fn function_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            content: None,
            function_call: Some(FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            }),
        }
    }
}

/// ChatModel is the boundary to the hosted model provider.
///
/// The evaluation pipeline only ever talks to this trait, so tests can substitute a
/// scripted model and production code uses [`crate::OpenAIClient`].
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one conversation and return the raw reply.
    async fn invoke(&self, conversation: &Conversation, output: &OutputSpec)
    -> Result<ModelResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaBuilder};
    use serde_json::json;

    struct Named;

    impl SchemaType for Named {
        fn schema() -> Schema {
            SchemaBuilder::object()
                .title("Named")
                .description("Does a thing")
                .property("ok", json!({ "type": "boolean" }), true)
                .build()
        }

        fn schema_name() -> Option<String> {
            Some("do_thing".to_string())
        }
    }

    struct Anonymous;

    impl SchemaType for Anonymous {
        fn schema() -> Schema {
            SchemaBuilder::object().build()
        }
    }

    #[test]
    fn test_function_spec_from_schema() {
        let spec = FunctionSpec::for_type::<Named>().expect("spec should build");
        assert_eq!(spec.name, "do_thing");
        assert_eq!(spec.description, "Does a thing");
        assert_eq!(spec.parameters["properties"]["ok"]["type"], "boolean");
        assert!(spec.parameters.get("title").is_none());
        assert!(spec.parameters.get("description").is_none());
    }

    #[test]
    fn test_function_spec_requires_name() {
        let err = FunctionSpec::for_type::<Anonymous>().unwrap_err();
        assert!(matches!(err, FitcheckError::SchemaError(_)));
    }

    #[test]
    fn test_message_constructors() {
        let system = ChatMessage::system("rules");
        assert_eq!(system.role.as_str(), "system");
        assert!(system.image.is_none());

        let image = EncodedImage::from_bytes("image/png", b"abc");
        let user = ChatMessage::user_with_image(image.clone(), "look");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.image, Some(image));
    }
}
