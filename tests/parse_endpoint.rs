use autocal::error::{completion_error, AppResult};
use autocal::extractor::CompletionService;
use autocal::server::{build_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

/// Mock completion service returning a canned result for testing
struct MockCompletion {
    result: Result<String, String>,
}

impl MockCompletion {
    /// State whose completion service returns `output` verbatim
    fn ok(output: &str) -> AppState {
        AppState {
            completion: Arc::new(MockCompletion {
                result: Ok(output.to_string()),
            }),
        }
    }

    /// State whose completion service fails with `message`
    fn err(message: &str) -> AppState {
        AppState {
            completion: Arc::new(MockCompletion {
                result: Err(message.to_string()),
            }),
        }
    }
}

#[async_trait::async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, _text: &str) -> AppResult<String> {
        match &self.result {
            Ok(output) => Ok(output.clone()),
            Err(message) => Err(completion_error(message)),
        }
    }
}

/// Send a parse request through the router and collect the response
async fn send_parse(state: AppState, text: &str) -> (StatusCode, Option<String>, String) {
    let app = build_router(state);
    let request = Request::builder()
        .method("POST")
        .uri("/api/parse")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "text": text }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

/// Extract the error message from a failure envelope
fn error_message(body: &str) -> String {
    let envelope: serde_json::Value = serde_json::from_str(body).unwrap();
    envelope["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn forwards_valid_model_output_verbatim() {
    let raw = "{\n  \"title\": \"Team sync\",\n  \"start\": \"2024-10-29T15:00:00-04:00\",\n  \"end\": \"2024-10-29T16:00:00-04:00\",\n  \"description\": \"Weekly team sync\"\n}";
    let (status, content_type, body) = send_parse(MockCompletion::ok(raw), "Team sync tomorrow 3pm-4pm").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    // Byte-for-byte, including the model's own whitespace
    assert_eq!(body, raw);
}

#[tokio::test]
async fn accepts_all_null_fields() {
    let raw = r#"{"title":null,"start":null,"end":null,"description":null}"#;
    let (status, _, body) = send_parse(MockCompletion::ok(raw), "no event here").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, raw);
}

#[tokio::test]
async fn accepts_full_day_span() {
    let raw = r#"{"title":"Lunch","start":"2024-10-28T00:00:00","end":"2024-10-28T23:59:59","description":"Lunch with Sam"}"#;
    let (status, _, _) = send_parse(MockCompletion::ok(raw), "lunch on 2024-10-28").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rejects_invalid_json_output() {
    let (status, content_type, body) = send_parse(
        MockCompletion::ok("Sure! Here is the event you asked for."),
        "dinner friday",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert!(!error_message(&body).is_empty());
}

#[tokio::test]
async fn rejects_unparseable_start_date() {
    // Regression for the weak date-constructibility check in the original:
    // this string must never produce a 200.
    let raw = r#"{"title":"Lunch","start":"not-a-date","end":null,"description":null}"#;
    let (status, _, body) = send_parse(MockCompletion::ok(raw), "lunch sometime").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("start"));
}

#[tokio::test]
async fn rejects_bare_date_without_time() {
    let raw = r#"{"title":"Lunch","start":"2024-10-28","end":"2024-10-28","description":null}"#;
    let (status, _, _) = send_parse(MockCompletion::ok(raw), "lunch on 2024-10-28").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn surfaces_upstream_failure_message() {
    let (status, _, body) = send_parse(
        MockCompletion::err("You exceeded your current quota, please check your plan and billing details."),
        "meeting monday 10am",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("quota"));
}

#[tokio::test]
async fn serves_the_input_page() {
    let app = build_router(MockCompletion::ok("{}"));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("Auto Calendar"));
    assert!(page.contains("/api/parse"));
}

#[tokio::test]
async fn input_page_drops_stream_bytes_after_resolve() {
    let app = build_router(MockCompletion::ok("{}"));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(body.to_vec()).unwrap();

    // The read loop must not accumulate trailing bytes once an event is set,
    // or a later render would re-show the streaming panel with the residue
    assert!(page.contains("if (state.phase === 'resolved') continue;"));
}

#[tokio::test]
async fn health_check_responds_ok() {
    let app = build_router(MockCompletion::ok("{}"));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}
