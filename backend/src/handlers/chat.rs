//! Chat assistant HTTP handler
//!
//! Relays user messages to the generative AI API and appends cited
//! sources as a markdown list, the way the chat widget renders them.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::external::AssistantClient;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Handle a chat message from the user
pub async fn handle_chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let message = request.message.unwrap_or_default();
    if message.is_empty() {
        return Err(AppError::Validation {
            field: "message".to_string(),
            message: "Please type a message".to_string(),
            message_pt: "Por favor, digite uma mensagem.".to_string(),
        });
    }

    let client = AssistantClient::new(
        state.config.assistant.api_endpoint.clone(),
        state.config.assistant.api_key.clone(),
    );
    let (reply, sources) = client.generate(&message).await;

    let mut response = reply;
    if !sources.is_empty() {
        response.push_str("\n\n**Fontes:**\n");
        for source in &sources {
            response.push_str(&format!("- [{}]({})\n", source.title, source.uri));
        }
    }

    Ok(Json(ChatResponse { response }))
}
