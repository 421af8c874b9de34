//! OpenAI wire-format tests against a local wiremock server.

mod common;

#[cfg(test)]
mod openai_mock_api_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use fitcheck::prompt::human_detection_prompt;
    use fitcheck::{
        ChatModel, EncodedImage, Evaluator, FitcheckError, FunctionSpec, HumanDetection,
        ImagePayload, OpenAIClient, OutputSpec,
    };
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::common::{analysis_json, png};

    fn completion(message: Value) -> Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": message,
                "finish_reason": "stop"
            }]
        })
    }

    fn function_call_completion(name: &str, arguments: &Value) -> Value {
        completion(json!({
            "role": "assistant",
            "content": null,
            "function_call": { "name": name, "arguments": arguments.to_string() }
        }))
    }

    fn client(server: &MockServer) -> OpenAIClient {
        OpenAIClient::new("test-api-key")
            .expect("client should build")
            .base_url(server.uri())
            .build()
    }

    fn image() -> EncodedImage {
        EncodedImage::from_bytes("image/png", b"pixels")
    }

    #[tokio::test]
    async fn test_forced_function_call_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.0,
                "function_call": { "name": "detect_human" },
                "functions": [{
                    "name": "detect_human",
                    "parameters": {
                        "type": "object",
                        "required": ["isPersonInImage"]
                    }
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(function_call_completion(
                "detect_human",
                &json!({ "isPersonInImage": true }),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let output = OutputSpec::FunctionCall(
            FunctionSpec::for_type::<HumanDetection>().expect("schema has a name"),
        );
        let response = client(&server)
            .invoke(&human_detection_prompt(&image()), &output)
            .await
            .expect("request should succeed");

        let call = response.function_call.expect("function call expected");
        assert_eq!(call.name, "detect_human");
        let detection: HumanDetection =
            fitcheck::ModelOutput::from_arguments(&call.arguments).expect("arguments decode");
        assert!(detection.is_person_in_image);
    }

    #[tokio::test]
    async fn test_image_is_sent_before_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [
                    { "role": "system" },
                    {
                        "role": "user",
                        "content": [
                            {
                                "type": "image_url",
                                "image_url": { "url": "data:image/png;base64,cGl4ZWxz" }
                            },
                            { "type": "text" }
                        ]
                    }
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(json!({ "role": "assistant", "content": "ok" }))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .invoke(&human_detection_prompt(&image()), &OutputSpec::Text)
            .await
            .expect("request should succeed");
        assert_eq!(response.content.as_deref(), Some("ok"));
        assert!(response.function_call.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .invoke(&human_detection_prompt(&image()), &OutputSpec::Text)
            .await
            .unwrap_err();

        match &err {
            FitcheckError::ApiError(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("Incorrect API key provided"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client(&server)
            .invoke(&human_detection_prompt(&image()), &OutputSpec::Text)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FitcheckError::ApiError("No completion choices returned".to_string())
        );
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(json!({ "role": "assistant", "content": "late" })))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = OpenAIClient::new("test-api-key")
            .expect("client should build")
            .base_url(server.uri())
            .timeout(Duration::from_millis(200))
            .build();

        let err = client
            .invoke(&human_detection_prompt(&image()), &OutputSpec::Text)
            .await
            .unwrap_err();
        assert_eq!(err, FitcheckError::Timeout);
    }

    #[tokio::test]
    async fn test_pipeline_over_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({ "function_call": { "name": "detect_human" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(function_call_completion(
                "detect_human",
                &json!({ "isPersonInImage": true }),
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(
                json!({ "function_call": { "name": "ootd_fashion_analysis" } }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(function_call_completion(
                "ootd_fashion_analysis",
                &analysis_json(),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let evaluator = Evaluator::new(Arc::new(client(&server)));
        let outcome = evaluator
            .evaluate_with_function_calling(ImagePayload::new("image/png", png(40, 80)))
            .await;

        assert!(outcome.success, "unexpected outcome: {outcome:?}");
        assert_eq!(outcome.analysis().unwrap().sense, 9.0);
    }
}
