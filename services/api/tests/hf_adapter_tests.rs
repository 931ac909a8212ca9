use api_lib::adapters::hf_llm::HuggingFaceAdapter;
use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use flashcard_core::{
    fallback_questions, PortError, QuestionDraft, QuestionGenerationService, QuestionGenerator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const NOTES: &str = "The heart pumps blood through the body. \
    Arteries carry oxygenated blood away from the heart.";

/// Serves `router` on an ephemeral local port and returns the endpoint URL.
async fn spawn_endpoint(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/models/test", addr)
}

fn adapter(url: &str, timeout: Duration) -> HuggingFaceAdapter {
    HuggingFaceAdapter::new(url, "hf_test_token", timeout).unwrap()
}

#[tokio::test]
async fn parses_generated_text_from_successful_response() {
    let router = Router::new().route(
        "/models/test",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let authorized = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                == Some("Bearer hf_test_token");
            let well_formed = body["inputs"]
                .as_str()
                .is_some_and(|p| p.starts_with("Generate 5 study questions") && p.contains("The heart pumps"))
                && body["parameters"]["max_length"] == 500
                && body["parameters"]["do_sample"] == true;
            if !authorized || !well_formed {
                return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad request" })));
            }
            (
                StatusCode::OK,
                Json(json!([{
                    "generated_text": "Q: What pumps blood?\nA: The heart.\nQ: What do arteries carry?\nA: Oxygenated blood\naway from the heart."
                }])),
            )
        }),
    );
    let url = spawn_endpoint(router).await;

    let questions = adapter(&url, Duration::from_secs(5))
        .generate_questions(NOTES)
        .await
        .unwrap();
    assert_eq!(
        questions,
        vec![
            QuestionDraft::new("What pumps blood?", "The heart."),
            QuestionDraft::new("What do arteries carry?", "Oxygenated blood away from the heart."),
        ]
    );
}

#[tokio::test]
async fn non_200_status_is_unavailable() {
    let router = Router::new().route(
        "/models/test",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "loading" }))) }),
    );
    let url = spawn_endpoint(router).await;

    let err = adapter(&url, Duration::from_secs(5))
        .generate_questions(NOTES)
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::Unavailable(_)));
}

#[tokio::test]
async fn empty_or_malformed_payloads_are_unavailable() {
    let router = Router::new()
        .route("/models/test", post(|| async { Json(json!([])) }))
        .route("/models/blank", post(|| async { Json(json!([{ "generated_text": "   " }])) }))
        .route("/models/shape", post(|| async { Json(json!({ "unexpected": true })) }));
    let url = spawn_endpoint(router).await;

    for endpoint in [url.clone(), url.replace("/test", "/blank"), url.replace("/test", "/shape")] {
        let result = adapter(&endpoint, Duration::from_secs(5))
            .generate_questions(NOTES)
            .await;
        assert!(matches!(result, Err(PortError::Unavailable(_))), "{endpoint}");
    }
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let router = Router::new().route(
        "/models/test",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!([{ "generated_text": "Q: late?\nA: yes" }]))
        }),
    );
    let url = spawn_endpoint(router).await;

    let result = adapter(&url, Duration::from_millis(200))
        .generate_questions(NOTES)
        .await;
    assert!(matches!(result, Err(PortError::Unavailable(_))));
}

#[tokio::test]
async fn generator_falls_back_when_endpoint_fails() {
    let router = Router::new().route(
        "/models/test",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_endpoint(router).await;
    let generator = QuestionGenerator::new(Arc::new(adapter(&url, Duration::from_secs(5))));

    let questions = generator.generate(NOTES).await;
    assert_eq!(questions, fallback_questions(NOTES));
    assert_eq!(questions.len(), 2);
}

#[tokio::test]
async fn response_without_markers_yields_no_questions() {
    let router = Router::new().route(
        "/models/test",
        post(|| async { Json(json!([{ "generated_text": "The heart is a muscle." }])) }),
    );
    let url = spawn_endpoint(router).await;

    let questions = adapter(&url, Duration::from_secs(5))
        .generate_questions(NOTES)
        .await
        .unwrap();
    assert!(questions.is_empty());
}
