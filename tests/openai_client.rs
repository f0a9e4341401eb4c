use serde_json::json;
use space_chat::llm::{
    ChatMessage, ChatOptions, LlmClient, LlmError, OpenAiClient, ToolChoice, ToolSchema,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn iss_schema() -> Vec<ToolSchema> {
    vec![ToolSchema::function(
        "fetch_iss_location",
        "Fetch the current location of the International Space Station (ISS).",
        json!({"type": "object", "properties": {}}),
    )]
}

#[tokio::test]
async fn tool_call_response_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "tool_choice": "auto",
            "parallel_tool_calls": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "fetch_iss_location", "arguments": "{}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test".to_string(), format!("{}/v1/", server.uri()));
    let tools = iss_schema();
    let response = client
        .chat_completion(
            "gpt-4o",
            &[ChatMessage::user("User: Where is the ISS?")],
            Some(&tools),
            ChatOptions::default(),
        )
        .await
        .expect("completion");

    assert_eq!(response.content, None);
    assert_eq!(response.finish_reason.as_deref(), Some("tool_calls"));
    let calls = response.tool_calls.expect("tool calls");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_abc");
    assert_eq!(calls[0].function.name, "fetch_iss_location");
}

#[tokio::test]
async fn final_answer_request_forbids_tools() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"tool_choice": "none"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "It is over the Pacific."},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test".to_string(), server.uri());
    let tools = iss_schema();
    let response = client
        .chat_completion(
            "gpt-4o",
            &[ChatMessage::user("User: Where is the ISS?")],
            Some(&tools),
            ChatOptions {
                parallel_tool_calls: false,
                tool_choice: ToolChoice::None,
            },
        )
        .await
        .expect("completion");

    assert_eq!(response.content.as_deref(), Some("It is over the Pacific."));
    assert!(response.tool_calls.is_none());
}

#[tokio::test]
async fn error_statuses_map_to_variants() {
    let cases: [(u16, fn(&LlmError) -> bool); 3] = [
        (401, |e| matches!(e, LlmError::Authentication(_))),
        (429, |e| matches!(e, LlmError::RateLimited(_))),
        (500, |e| matches!(e, LlmError::Api { status: 500, .. })),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test".to_string(), server.uri());
        let err = client
            .chat_completion(
                "gpt-4o",
                &[ChatMessage::user("hi")],
                None,
                ChatOptions::default(),
            )
            .await
            .expect_err("error status");
        assert!(expected(&err), "status {status} gave {err:?}");
    }
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test".to_string(), server.uri());
    let err = client
        .chat_completion("gpt-4o", &[ChatMessage::user("hi")], None, ChatOptions::default())
        .await
        .expect_err("no choices");
    assert!(matches!(err, LlmError::NoChoices));
}

#[tokio::test]
async fn garbage_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test".to_string(), server.uri());
    let err = client
        .chat_completion("gpt-4o", &[ChatMessage::user("hi")], None, ChatOptions::default())
        .await
        .expect_err("decode");
    assert!(matches!(err, LlmError::Decode(_)));
}
