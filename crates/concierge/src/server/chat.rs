use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Final natural-language answer", body = ChatResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse),
    ),
    description = "Answer a natural-language query, invoking local tools when the model asks for them."
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn chat(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    // A body that is not a JSON object carries no query either; the
    // error shape must stay `{"error": ...}` rather than axum's
    // plain-text rejection.
    let Ok(Json(payload)) = payload else {
        return Err(ApiError::bad_request("Request body must contain 'query'."));
    };
    let query = payload.query.as_deref().unwrap_or("").trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("Request body must contain 'query'."));
    }

    let response = state.orchestrator.handle_query(query).await?;
    Ok(Json(ChatResponse { response }))
}
