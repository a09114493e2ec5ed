//! # Route Handlers
//!
//! Thin Axum handlers: validate the payload, delegate to the library, map
//! the result into the API types. Collaborator failures inside a chat turn
//! never surface here (the engine degrades internally), so the error paths
//! below are input validation and direct retrieval calls only.

use crate::{
    errors::AppError,
    state::AppState,
    types::{
        ChatRequest, ChatResponse, ConversationMessage, ConversationRequest,
        ConversationResponse, ProcessTextRequest, ProcessTextResponse, SearchRequest,
        SearchResponse,
    },
};
use axum::{extract::State, Json};
use possap_assist::engine::SEARCH_TOP_K;
use serde_json::{json, Value};
use tracing::info;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "possap-assist server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model": app_state.config.generation.model_name,
        "total_faqs": app_state.total_faqs,
        "hyperlink_processing": "enabled",
        "conversation_memory": "enabled",
    }))
}

/// The handler for the `/chat` endpoint: one conversational turn.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("No message received".to_string()))?;

    info!(
        conversation_id = payload.conversation_id.as_deref().unwrap_or("<new>"),
        "Received chat message"
    );

    let outcome = app_state
        .chat
        .handle_message(payload.conversation_id.as_deref(), &message)
        .await;

    Ok(Json(ChatResponse::from(outcome)))
}

/// The handler for the `/conversation` endpoint: a read-only view of one
/// session's history, with hyperlinks applied to each stored turn.
pub async fn conversation_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ConversationRequest>,
) -> Result<Json<ConversationResponse>, AppError> {
    let conversation_id = payload
        .conversation_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("No conversation_id provided".to_string()))?;

    let snapshot = app_state
        .store
        .snapshot(&conversation_id)
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;

    let messages = snapshot
        .messages
        .into_iter()
        .map(|turn| ConversationMessage {
            role: turn.role,
            content: app_state.links.rewrite(&turn.content),
            raw_content: turn.content,
            timestamp: turn.timestamp,
        })
        .collect();

    Ok(Json(ConversationResponse {
        success: true,
        conversation_id,
        user_name: snapshot.user_name,
        messages,
        created_at: snapshot.created_at,
        last_activity: snapshot.last_activity,
    }))
}

/// The handler for the `/search` endpoint: direct semantic FAQ lookup.
pub async fn search_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = payload
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("No query provided".to_string()))?;

    info!(query = %query, "Received FAQ search");
    let faqs = app_state.retriever.retrieve(&query, SEARCH_TOP_K).await?;

    Ok(Json(SearchResponse { faqs }))
}

/// The handler for the `/process-text` endpoint: hyperlink arbitrary text.
pub async fn process_text_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ProcessTextRequest>,
) -> Result<Json<ProcessTextResponse>, AppError> {
    let text = payload
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("No text provided".to_string()))?;

    let processed_text = app_state.links.rewrite(&text);
    Ok(Json(ProcessTextResponse {
        original_text: text,
        processed_text,
    }))
}
