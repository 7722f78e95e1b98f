use std::time::Duration;

use docchat_api::{Backend, ChatClient, DocumentFile, HttpBackend};
use docchat_core::{
    ChatReply, ChatRequest, ChatTurn, ClientConfig, Message, Outcome, RecordingSurface,
    UploadReply, UploadRequest, TIMEOUT_MESSAGE, UPLOAD_CONFIRMATION,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_upload_success(server: &MockServer, session_id: &str) {
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "File processed successfully.",
            "session_id": session_id
        })))
        .mount(server)
        .await;
}

fn upload_request(model: Option<&str>) -> UploadRequest<DocumentFile> {
    UploadRequest {
        file: DocumentFile::new("report.txt", "The capital is Paris."),
        model: model.map(str::to_string),
    }
}

#[tokio::test]
async fn upload_sends_multipart_file_and_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(multipart_content_type())
        .and(body_string_contains("name=\"file\"; filename=\"report.txt\""))
        .and(body_string_contains("name=\"model\""))
        .and(body_string_contains("llama"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session_id": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri()).unwrap();
    let outcome = backend.upload(upload_request(Some("llama"))).await;

    assert_eq!(
        outcome,
        Outcome::Success(UploadReply {
            session_id: Some("abc".to_string()),
            ..Default::default()
        })
    );
}

fn multipart_content_type() -> impl wiremock::Match {
    wiremock::matchers::header_regex("content-type", "^multipart/form-data")
}

#[tokio::test]
async fn upload_error_body_is_decoded_despite_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "Failed to extract text: bad pdf"})),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri()).unwrap();
    let outcome = backend.upload(upload_request(None)).await;

    assert_eq!(
        outcome,
        Outcome::Success(UploadReply {
            error: Some("Failed to extract text: bad pdf".to_string()),
            ..Default::default()
        })
    );
}

#[tokio::test]
async fn chat_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "message": "What is the capital?",
            "session_id": "abc",
            "chat_history": [{"user": "hi", "bot": "hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Paris"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri()).unwrap();
    let request = ChatRequest {
        message: "What is the capital?".to_string(),
        session_id: Some("abc".to_string()),
        chat_history: Some(vec![ChatTurn::new("hi", "hello")]),
    };

    assert_eq!(
        backend.chat(&request).await,
        Outcome::Success(ChatReply {
            response: Some("Paris".to_string()),
            error: None,
        })
    );
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri()).unwrap();
    let request = ChatRequest {
        message: "q".to_string(),
        session_id: None,
        chat_history: None,
    };

    assert!(matches!(
        backend.chat(&request).await,
        Outcome::TransportError(_)
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let backend = HttpBackend::new(&uri).unwrap();
    assert!(matches!(
        backend.upload(upload_request(None)).await,
        Outcome::TransportError(_)
    ));
}

#[tokio::test]
async fn client_round_trip_against_server() {
    let server = MockServer::start().await;
    mock_upload_success(&server, "s-42").await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "message": "What is the capital?",
            "session_id": "s-42",
            "chat_history": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Paris"})))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri()).unwrap();
    let mut client = ChatClient::new(backend, ClientConfig::default(), RecordingSurface::new());

    client
        .upload(Some(DocumentFile::new("geo.txt", "France")), None)
        .await
        .unwrap();
    client.chat("What is the capital?").await.unwrap();

    let controller = client.controller();
    let messages: Vec<&Message> = controller.transcript().messages().collect();
    assert_eq!(
        messages,
        vec![
            &Message::bot(UPLOAD_CONFIRMATION),
            &Message::user("What is the capital?"),
            &Message::bot("Paris"),
        ]
    );
    assert!(!controller.transcript().has_thinking());
    assert_eq!(controller.state().history, vec![ChatTurn::new("What is the capital?", "Paris")]);
}

#[tokio::test]
async fn missing_session_reply_is_shown_as_bot_text() {
    let server = MockServer::start().await;
    mock_upload_success(&server, "s-1").await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"response": "No document uploaded yet."})),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri()).unwrap();
    let mut client = ChatClient::new(backend, ClientConfig::basic(), RecordingSurface::new());
    client
        .upload(Some(DocumentFile::new("a.txt", "x")), None)
        .await
        .unwrap();
    client.chat("hello?").await.unwrap();

    assert_eq!(
        client.controller().transcript().last_message(),
        Some(&Message::bot("No document uploaded yet."))
    );
}

#[tokio::test]
async fn slow_chat_times_out() {
    let server = MockServer::start().await;
    mock_upload_success(&server, "s-1").await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "too late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri()).unwrap();
    let config = ClientConfig::default().with_timeout(Some(Duration::from_millis(100)));
    let mut client = ChatClient::new(backend, config, RecordingSurface::new());
    client
        .upload(Some(DocumentFile::new("a.txt", "x")), None)
        .await
        .unwrap();

    let outcome = client.chat("anyone there?").await.unwrap();
    assert_eq!(outcome, Outcome::Timeout);

    let controller = client.controller();
    assert_eq!(controller.surface().error, TIMEOUT_MESSAGE);
    assert_eq!(
        controller.transcript().last_message(),
        Some(&Message::user("anyone there?"))
    );
}
