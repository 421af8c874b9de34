//! Conversation templates for the two evaluation stages.
//!
//! Each builder returns a system message followed by one user message that carries
//! the image and a short instruction. The `*_structured_prompt` variants also embed a
//! format instruction in the system message.

use crate::backend::{ChatMessage, Conversation};
use crate::normalizer::EncodedImage;

const HUMAN_DETECTION_SYSTEM: &str = "You need to evaluate pictrue with given prompt";
const HUMAN_DETECTION_QUESTION: &str = "Does this image contain a person wearing clothes?";

const HUMAN_DETECTION_STRUCTURED_SYSTEM: &str = "You are an AI that analyzes images to detect if a person is present.
Your task is to determine if there is a person wearing clothes in the image.";
const HUMAN_DETECTION_STRUCTURED_QUESTION: &str =
    "Analyze this image and determine if there is a person wearing clothes in it.";

const FASHION_ANALYSIS_SYSTEM: &str = "You are a fashion analysis AI. Analyze the clothing style in the image and provide a structured evaluation. Be creative with the hashtags and make your analysis engaging and slightly humorous.
Use Korean language for the summary and hashtags. AGAIN, YOU MUST USE KOREAN LANGUAGE FOR THE SUMMARY AND HASHTAGS.";
const FASHION_ANALYSIS_QUESTION: &str = "Analyze the fashion style in this image.";

const FASHION_ANALYSIS_STRUCTURED_SYSTEM: &str = "You are a fashion analysis AI. Your job is to analyze clothing styles in images.
Please evaluate the fashion style in the image and provide a detailed analysis.
YOU MUST USE KOREAN LANGUAGE FOR THE SUMMARY AND HASHTAGS AND ANSWER IN REALLY SHORT AS YOU CAN";
const FASHION_ANALYSIS_STRUCTURED_QUESTION: &str = "Analyze the fashion style in this image";

fn with_format_instruction(system: &str, format_instruction: &str) -> String {
    format!("{system}\n\nResponse format:\n{format_instruction}\n")
}

fn two_turn(system: String, image: &EncodedImage, question: &str) -> Conversation {
    Conversation::new(vec![
        ChatMessage::system(system),
        ChatMessage::user_with_image(image.clone(), question),
    ])
}

/// Human detection, function-calling flavour.
pub fn human_detection_prompt(image: &EncodedImage) -> Conversation {
    two_turn(
        HUMAN_DETECTION_SYSTEM.to_string(),
        image,
        HUMAN_DETECTION_QUESTION,
    )
}

/// Fashion analysis, function-calling flavour.
pub fn fashion_analysis_prompt(image: &EncodedImage) -> Conversation {
    two_turn(
        FASHION_ANALYSIS_SYSTEM.to_string(),
        image,
        FASHION_ANALYSIS_QUESTION,
    )
}

/// Human detection with the expected output format spelled out in the system message.
pub fn human_detection_structured_prompt(
    image: &EncodedImage,
    format_instruction: &str,
) -> Conversation {
    two_turn(
        with_format_instruction(HUMAN_DETECTION_STRUCTURED_SYSTEM, format_instruction),
        image,
        HUMAN_DETECTION_STRUCTURED_QUESTION,
    )
}

/// Fashion analysis with the expected output format spelled out in the system message.
pub fn fashion_analysis_structured_prompt(
    image: &EncodedImage,
    format_instruction: &str,
) -> Conversation {
    two_turn(
        with_format_instruction(FASHION_ANALYSIS_STRUCTURED_SYSTEM, format_instruction),
        image,
        FASHION_ANALYSIS_STRUCTURED_QUESTION,
    )
}
