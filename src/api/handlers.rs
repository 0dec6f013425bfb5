//! HTTP request handlers

use super::types::*;
use super::{AppState, CompletionBackend};
use crate::format::{format, to_html};
use crate::llm::LlmRequest;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Completion relay
        .route("/api/chat", post(chat))
        // Server-side formatting
        .route("/api/render", post(render))
        // Version info
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Completion Relay
// ============================================================

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!(messages = req.messages.len(), "Relaying chat request");

    let service = match &state.completion {
        CompletionBackend::Ready(service) => service,
        CompletionBackend::Unconfigured(e) => {
            tracing::warn!(error = %e, "Chat request rejected");
            return Err(AppError::Internal(e.to_string()));
        }
    };

    let response = service
        .complete(&LlmRequest::new(req.messages))
        .await
        .map_err(|e| AppError::Internal(e.message))?;

    Ok(Json(ChatResponse {
        message: response.message,
    }))
}

// ============================================================
// Formatting
// ============================================================

async fn render(
    body: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let blocks = format(&req.content);
    let html = to_html(&blocks);
    Ok(Json(RenderResponse { blocks, html }))
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
