#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use fitcheck::{
    ChatModel, Conversation, FitcheckError, ModelResponse, OutputSpec, Result,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{Value, json};

/// A single recorded model invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub conversation: Conversation,
    pub output: OutputSpec,
}

/// A `ChatModel` that replays queued responses and records what it was asked.
#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<ModelResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<ModelResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn invoke(
        &self,
        conversation: &Conversation,
        output: &OutputSpec,
    ) -> Result<ModelResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            conversation: conversation.clone(),
            output: output.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FitcheckError::ApiError("script exhausted".to_string())))
    }
}

pub fn function_call(name: &str, arguments: Value) -> Result<ModelResponse> {
    Ok(ModelResponse::function_call(name, arguments.to_string()))
}

pub fn text(content: &str) -> Result<ModelResponse> {
    Ok(ModelResponse::text(content))
}

pub fn person(present: bool) -> Value {
    json!({ "isPersonInImage": present })
}

pub fn analysis_json() -> Value {
    json!({
        "summary": "캐주얼한 스트릿 룩",
        "points": 7,
        "balance": 8,
        "sophistication": 6.5,
        "sense": 9,
        "hashtags": ["#스트릿", "#오버핏"]
    })
}

/// A solid-colour image encoded in the given format.
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 80, 40])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("fixture image should encode");
    out.into_inner()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Png)
}
