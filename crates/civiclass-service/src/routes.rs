//! HTTP routes and handlers
//!
//! Thin wiring over the classification engine. The engine is total over
//! string input, so the handlers have no failure path of their own beyond
//! request deserialization.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use civiclass_core::{ClassificationResult, SimilarCategory};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/classify", post(classify))
        .route("/classify/similar", post(similar))
        .route("/train", post(train))
        .fallback(fallback)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "civiclass" }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}

/// Synchronous classification request
#[derive(Debug, Deserialize)]
struct ClassificationRequest {
    text: String,
    title: String,
}

async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassificationRequest>,
) -> Json<ClassificationResult> {
    metrics::counter!("civiclass_requests_total").increment(1);

    let result = state.engine.classify(&req.text, &req.title);
    debug!(
        category = %result.category_name,
        confidence = result.confidence,
        "classified request"
    );

    Json(result)
}

/// Category suggestion request
#[derive(Debug, Deserialize)]
struct SimilarRequest {
    text: String,

    #[serde(default = "default_top_k")]
    top_k: usize,
}

fn default_top_k() -> usize {
    3
}

async fn similar(
    State(state): State<AppState>,
    Json(req): Json<SimilarRequest>,
) -> Json<Vec<SimilarCategory>> {
    metrics::counter!("civiclass_requests_total").increment(1);

    Json(state.engine.top_similar(&req.text, req.top_k))
}

/// Model retraining trigger
///
/// Scoring is rule-based; there is no model to retrain. The endpoint is
/// kept for API compatibility with callers that schedule training runs.
async fn train() -> Json<Value> {
    Json(json!({ "message": "Training scheduled", "status": "pending" }))
}

async fn fallback() -> &'static str {
    "Not found"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use civiclass_engine::{CategoryCatalog, ClassificationEngine};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        let engine = Arc::new(ClassificationEngine::new(CategoryCatalog::builtin()).unwrap());
        let metrics = PrometheusBuilder::new().build_recorder().handle();
        create_router(AppState::new(engine, metrics))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn classify_returns_full_result() {
        let (status, body) = post_json(
            "/classify",
            json!({
                "text": "water leaking from a burst pipe",
                "title": "Leak near the school"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category_name"], "Water Leakage");
        assert_eq!(body["department_id"], 2);
        assert!(body["confidence"].as_f64().unwrap() > 0.0);
        assert!(body["keywords_matched"].is_array());
        assert!(body["needs_manual_review"].is_boolean());
    }

    #[tokio::test]
    async fn classify_rejects_malformed_body() {
        let (status, _) = post_json("/classify", json!({ "text": "missing title" })).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn similar_defaults_to_three_suggestions() {
        let (status, body) = post_json(
            "/classify/similar",
            json!({ "text": "water supply problem, pipes dry, garbage nearby" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let suggestions = body.as_array().unwrap();
        assert!(suggestions.len() <= 3);
        assert!(!suggestions.is_empty());
    }

    #[tokio::test]
    async fn similar_honors_top_k() {
        let (status, body) = post_json(
            "/classify/similar",
            json!({ "text": "water supply problem", "top_k": 1 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn train_is_a_placeholder() {
        let (status, body) = post_json("/train", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "pending");
    }
}
