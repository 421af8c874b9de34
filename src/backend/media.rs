use serde::Serialize;

use crate::backend::ChatMessage;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum OpenAIMessageContent {
    Text(String),
    Parts(Vec<OpenAIMessagePart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum OpenAIMessagePart {
    Text { text: String },
    ImageUrl { image_url: OpenAIImageUrl },
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAIImageUrl {
    pub(crate) url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail: Option<String>,
}

/// Build the `content` field for a chat message: a plain string for text-only
/// messages, otherwise the image part followed by the text part.
pub(crate) fn build_openai_message_content(msg: &ChatMessage) -> OpenAIMessageContent {
    let Some(image) = msg.image.as_ref() else {
        return OpenAIMessageContent::Text(msg.content.clone());
    };

    let mut parts = vec![OpenAIMessagePart::ImageUrl {
        image_url: OpenAIImageUrl {
            url: image.as_str().to_string(),
            detail: Some("auto".to_string()),
        },
    }];
    if !msg.content.is_empty() {
        parts.push(OpenAIMessagePart::Text {
            text: msg.content.clone(),
        });
    }

    OpenAIMessageContent::Parts(parts)
}
