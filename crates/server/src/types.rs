//! # API Payloads
//!
//! Request and response types for the HTTP surface.

use chrono::{DateTime, Utc};
use possap_assist::{ChatOutcome, FaqEntry, Role, TurnState};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub conversation_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub raw_reply: String,
    pub relevant_faqs: Vec<FaqEntry>,
    pub context_used: bool,
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_captured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asking_for_name: Option<bool>,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        let (name_captured, asking_for_name) = match outcome.state {
            TurnState::NameCaptured => (Some(true), None),
            TurnState::AskingForName => (None, Some(true)),
            TurnState::Answered => (None, None),
        };
        Self {
            reply: outcome.reply,
            raw_reply: outcome.raw_reply,
            relevant_faqs: outcome.relevant_faqs,
            context_used: outcome.context_used,
            conversation_id: outcome.conversation_id,
            user_name: outcome.user_name,
            name_captured,
            asking_for_name,
        }
    }
}

#[derive(Deserialize)]
pub struct ConversationRequest {
    pub conversation_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    pub raw_content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct ConversationResponse {
    pub success: bool,
    pub conversation_id: String,
    pub user_name: Option<String>,
    pub messages: Vec<ConversationMessage>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SearchResponse {
    pub faqs: Vec<FaqEntry>,
}

#[derive(Deserialize)]
pub struct ProcessTextRequest {
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ProcessTextResponse {
    pub original_text: String,
    pub processed_text: String,
}
