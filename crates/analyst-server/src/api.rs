//! HTTP router and handlers.

use crate::error::ApiError;
use analyst_common::AnalystError;
use analyst_engine::{AnalysisKind, AnalysisReport, Analyst};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error};

/// Multipart field holding the questions document.
pub const QUESTIONS_FIELD: &str = "questions.txt";

/// Header carrying the number of substituted answers.
pub const FALLBACKS_HEADER: &str = "x-analysis-fallbacks";

/// Header carrying the detected analysis kind.
pub const KIND_HEADER: &str = "x-analysis-kind";

/// Shared application state for the API
#[derive(Clone, Debug)]
pub struct ApiState {
    /// Analysis service
    pub analyst: Analyst,
    /// Process start, for uptime
    pub started: Instant,
}

impl ApiState {
    pub fn new(analyst: Analyst) -> Self {
        Self {
            analyst,
            started: Instant::now(),
        }
    }
}

/// Service metadata response
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    pub endpoints: Endpoints,
}

/// Endpoint map advertised by `GET /`
#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub analyze: &'static str,
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// Create the API router with all endpoints
pub fn create_api_router(state: ApiState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/api/", post(analyze))
        .route("/api", post(analyze))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(state)
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Data Analyst Agent API",
        status: "running",
        endpoints: Endpoints {
            health: "/health",
            analyze: "/api/",
        },
    })
}

async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "data-analyst-agent",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

fn is_questions_part(name: Option<&str>, file_name: Option<&str>) -> bool {
    matches!(name, Some("questions" | QUESTIONS_FIELD))
        || file_name.is_some_and(|f| f.starts_with("questions"))
}

/// Reads the questions part, or fails with `InputMissing` when absent.
async fn read_questions(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read multipart body: {e}")))?
    {
        if is_questions_part(field.name(), field.file_name()) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Internal(format!("Failed to read {QUESTIONS_FIELD}: {e}")))?;
            return Ok(bytes.to_vec());
        }
        debug!(name = ?field.name(), "Skipping multipart field");
    }

    Err(AnalystError::input_missing(QUESTIONS_FIELD).into())
}

async fn analyze(
    State(state): State<ApiState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(%rejection, "Request body is not multipart");
        ApiError::from(AnalystError::input_missing(QUESTIONS_FIELD))
    })?;
    let questions = read_questions(&mut multipart).await?;

    let analyst = state.analyst.clone();
    let task_input = questions.clone();
    let report = match tokio::spawn(async move { analyst.analyze_bytes(&task_input).await }).await
    {
        Ok(report) => report,
        Err(join_error) => {
            error!(%join_error, "Analysis task aborted");
            AnalysisReport::Failed {
                kind: AnalysisKind::classify(&String::from_utf8_lossy(&questions)),
                reason: join_error.to_string(),
            }
        }
    };

    Ok(report_response(&report))
}

fn report_response(report: &AnalysisReport) -> Response {
    (
        StatusCode::OK,
        [
            (FALLBACKS_HEADER, report.fallback_count().to_string()),
            (KIND_HEADER, report.kind().to_string()),
        ],
        Json(report.to_json()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_part_names() {
        assert!(is_questions_part(Some("questions.txt"), None));
        assert!(is_questions_part(Some("questions"), None));
        assert!(is_questions_part(Some("file"), Some("questions-v2.txt")));
        assert!(!is_questions_part(Some("data.csv"), Some("data.csv")));
        assert!(!is_questions_part(None, None));
    }

    #[test]
    fn test_report_response_headers() {
        let report = AnalysisReport::Failed {
            kind: AnalysisKind::Court,
            reason: "boom".to_string(),
        };
        let response = report_response(&report);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[FALLBACKS_HEADER], "3");
        assert_eq!(response.headers()[KIND_HEADER], "court");
    }
}
