use crate::AppState;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pageprobe_core::report::AnalysisRequest;
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

const INDEX_HTML: &str = include_str!("static/index.html");

/// Generic failure message for any error during browser automation; the
/// underlying cause is logged server-side only.
pub const ANALYSIS_FAILED_MSG: &str =
    "Failed to analyze website performance. Please check if the URL is accessible.";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    let url = match pageprobe_core::validate::validate_url(&request.url) {
        Ok(url) => url,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    // One permit per running browser; excess requests wait here.
    let permit = match state.limiter.clone().acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            tracing::error!("admission semaphore closed");
            return analysis_failed();
        }
    };

    tracing::info!(%url, "analysis started");
    let result = state.analyzer.analyze(&url).await;
    drop(permit);

    match result {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!(%url, "analysis failed: {e}");
            analysis_failed()
        }
    }
}

fn analysis_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: ANALYSIS_FAILED_MSG.to_string(),
        }),
    )
        .into_response()
}
