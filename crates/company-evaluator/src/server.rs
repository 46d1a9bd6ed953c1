use std::any::Any;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, Response, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::{EvaluateError, GENERIC_FAILURE_MESSAGE};
use crate::model::EvaluationRequest;
use crate::pipeline::Evaluator;

pub fn create_router(evaluator: Evaluator) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/api/evaluate", post(evaluate))
        .route("/api/health", get(health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(evaluator)
}

/// `POST /api/evaluate` with `{"url": "..."}`.
///
/// The body is read raw so that malformed JSON maps to the same 400 as a missing URL.
async fn evaluate(
    State(evaluator): State<Evaluator>,
    body: Bytes,
) -> Result<Json<Value>, EvaluateError> {
    let request = EvaluationRequest::from_body(&body)?;
    let evaluation = evaluator.evaluate(&request).await?;
    Ok(Json(evaluation))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "request handler panicked");

    let body = json!({ "error": GENERIC_FAILURE_MESSAGE }).to_string();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
