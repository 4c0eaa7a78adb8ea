use travel_assistant_backend::config::GeminiConfig;
use travel_assistant_backend::error::{AppError, GenerationError};
use travel_assistant_backend::message::{ChatResponse, FailureResponse, ValidationErrorResponse};
use travel_assistant_backend::routes::create_router;
use travel_assistant_backend::services::fallback::{CATALOG, DISCLAIMER};
use travel_assistant_backend::services::gemini::{
    GeminiClient, GenerationConfig, GenerationService,
};
use travel_assistant_backend::state::AppState;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct CountingGenerator {
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GenerationService for CountingGenerator {
    async fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(GenerationError::Api {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                message: "model overloaded".to_string(),
            }),
        }
    }
}

fn app_with(reply: Option<&str>) -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let generator = CountingGenerator {
        reply: reply.map(str::to_string),
        calls: calls.clone(),
    };
    let state = Arc::new(AppState::new(Arc::new(generator)));
    (create_router().with_state(state), calls)
}

fn ask(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_ask_endpoint_returns_generated_text() {
    let (app, calls) = app_with(Some("  Try poha at Sarafa.\n"));

    let response = app.oneshot(ask(r#"{"message": "hello"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(chat_resp.success);
    assert_eq!(chat_resp.response, "Try poha at Sarafa.");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_or_empty_message_is_rejected_without_calling_out() {
    for body in [r#"{}"#, r#"{"message": ""}"#, r#"{"message": null}"#] {
        let (app, calls) = app_with(Some("unused"));
        let response = app.oneshot(ask(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let bytes = body_bytes(response).await;
        let err: ValidationErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(err.error, "Message is required");

        let raw: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(raw.get("success").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_generation_failure_is_reported_as_success() {
    let (app, calls) = app_with(None);

    let response = app
        .oneshot(ask(r#"{"message": "Where can I stay?"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(chat_resp.success);
    assert_eq!(chat_resp.response, format!("{}{}", CATALOG[2].text, DISCLAIMER));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_body_is_a_terminal_failure() {
    let (app, calls) = app_with(Some("unused"));

    let response = app.oneshot(ask(r#"{"message": "#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let failure: FailureResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(!failure.success);
    assert_eq!(
        failure.error,
        "I'm sorry, I'm having trouble connecting right now. Please try again in a moment."
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_whitespace_message_is_answered() {
    let (app, calls) = app_with(Some("Namaste!"));

    let response = app.oneshot(ask(r#"{"message": "   "}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(chat_resp.success);
    assert_eq!(chat_resp.response, "Namaste!");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_handler_faults_map_to_guidance() {
    let cases = [
        (
            "upstream returned 429 Too Many Requests",
            "Too many requests. Please wait a moment and try again.",
        ),
        (
            "API key not valid. API_KEY_INVALID",
            "API access denied. Please check if the API key is valid and has the necessary permissions. Make sure the Gemini API is enabled in your Google Cloud Console.",
        ),
    ];

    for (raw, expected) in cases {
        let response = AppError::HandlerFault(raw.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let failure: FailureResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(!failure.success);
        assert_eq!(failure.error, expected);
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = app_with(Some("unused"));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let raw: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(raw["status"], "Server is running");
}

#[tokio::test]
async fn test_poha_request_with_upstream_outage_end_to_end() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": { "message": "Internal error encountered." }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = GeminiConfig::new(Some("test-key".into())).with_base_url(mock_server.uri());
    let client = GeminiClient::new(config).unwrap();
    let state = Arc::new(AppState::new(Arc::new(client)));
    let app = create_router().with_state(state);

    let response = app
        .oneshot(ask(r#"{"message": "poha recommendations"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(chat_resp.success);
    assert_eq!(
        chat_resp.response,
        format!(
            "{}\n\n*Note: Currently using demo responses due to API issues. Real AI responses will be available shortly.*",
            CATALOG[0].text
        )
    );
}
