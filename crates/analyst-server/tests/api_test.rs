//! Router tests driving the API through `tower::ServiceExt::oneshot`.

use analyst_common::fetcher::main_table_from_html;
use analyst_common::test_utils::{fixtures, init_test_logging};
use analyst_common::{AnalystError, MockTableFetcher, Table, TableFetcher};
use analyst_config::Config;
use analyst_engine::court::{PLOT_QUESTION, SLOPE_QUESTION, TOP_COURT_QUESTION};
use analyst_engine::Analyst;
use analyst_graphs::PLACEHOLDER_PNG_DATA_URI;
use analyst_server::{create_api_router, ApiState, FALLBACKS_HEADER, KIND_HEADER};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "analyst-test-boundary";

fn app(mock: MockTableFetcher) -> Router {
    let analyst = Analyst::new(Arc::new(Config::default()), Arc::new(mock));
    create_api_router(ApiState::new(analyst), 1024 * 1024)
}

/// Fetcher whose failure unwinds through the analysis task.
struct PanickingFetcher;

#[async_trait]
impl TableFetcher for PanickingFetcher {
    async fn fetch_table(&self, url: &str) -> analyst_common::Result<Table> {
        panic!("table extraction crashed for {url}");
    }
}

fn multipart_body(field: &str, file_name: &str, content: &str) -> Body {
    Body::from(format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    ))
}

fn upload(uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_metadata() {
    let response = app(MockTableFetcher::new())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Data Analyst Agent API");
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["analyze"], "/api/");
}

#[tokio::test]
async fn test_health() {
    let response = app(MockTableFetcher::new())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "data-analyst-agent");
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_missing_questions_part_is_bad_request() {
    let response = app(MockTableFetcher::new())
        .oneshot(upload("/api/", multipart_body("data", "data.csv", "a,b\n1,2")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "questions.txt is required");
}

#[tokio::test]
async fn test_non_multipart_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app(MockTableFetcher::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_films_questions() {
    init_test_logging();

    let mut mock = MockTableFetcher::new();
    mock.expect_fetch_table()
        .returning(|url| main_table_from_html(&fixtures::films_html(), url));

    let response = app(mock)
        .oneshot(upload(
            "/api/",
            multipart_body("questions.txt", "questions.txt", fixtures::FILM_QUESTIONS),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[KIND_HEADER], "films");
    assert_eq!(response.headers()[FALLBACKS_HEADER], "0");

    let body = json_body(response).await;
    let answers = body.as_array().unwrap();
    assert_eq!(answers.len(), 4);
    assert_eq!(answers[0], 1);
    assert_eq!(answers[1], "Titanic");
    let plot = answers[3].as_str().unwrap();
    assert!(plot.starts_with("data:image/png;base64,"));
    assert!(plot.len() < 100_000);
}

#[tokio::test]
async fn test_films_fetch_failure_still_ok() {
    let mut mock = MockTableFetcher::new();
    mock.expect_fetch_table()
        .returning(|url| Err(AnalystError::fetch("timed out", url)));

    let response = app(mock)
        .oneshot(upload(
            "/api",
            multipart_body("questions", "q.txt", "List of highest-grossing films"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[FALLBACKS_HEADER], "4");
    let body = json_body(response).await;
    assert_eq!(body[0], 1);
    assert_eq!(body[1], "Titanic");
    assert_eq!(body[2], 0.485782);
}

#[tokio::test]
async fn test_court_questions() {
    let response = app(MockTableFetcher::new())
        .oneshot(upload(
            "/api/",
            multipart_body("file", "questions.txt", fixtures::COURT_QUESTIONS),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[KIND_HEADER], "court");

    let body = json_body(response).await;
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object[TOP_COURT_QUESTION], "33_10");
    assert_eq!(object[SLOPE_QUESTION], 0.123456);
    assert!(object[PLOT_QUESTION]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_truncated_multipart_is_internal_error() {
    // The first part is never terminated, so skipping it fails mid-stream.
    let body = Body::from(format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"data\"; filename=\"data.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         a,b\n1,2\n"
    ));

    let response = app(MockTableFetcher::new())
        .oneshot(upload("/api/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_crashed_analysis_returns_placeholders() {
    let analyst = Analyst::new(Arc::new(Config::default()), Arc::new(PanickingFetcher));
    let app = create_api_router(ApiState::new(analyst), 1024 * 1024);

    let response = app
        .oneshot(upload(
            "/api/",
            multipart_body("questions.txt", "questions.txt", fixtures::FILM_QUESTIONS),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[KIND_HEADER], "films");
    assert_eq!(response.headers()[FALLBACKS_HEADER], "4");

    let body = json_body(response).await;
    assert_eq!(
        body,
        serde_json::json!(["Error", "Error", 0, PLACEHOLDER_PNG_DATA_URI])
    );
}
