//! # Chat Orchestration
//!
//! One entry point per inbound message: [`ChatEngine::handle_message`].
//! It owns the turn-taking rules (a session must have a visitor name before
//! questions are answered) and composes the conversation store, name
//! extraction, and the response engine.

use crate::{
    corpus::FaqEntry,
    elicitation::{is_greeting, NameExtractor},
    engine::ResponseEngine,
    links::LinkRewriter,
    store::{ConversationStore, Role, MAX_TURNS},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Clients may send this placeholder instead of omitting the id; both mean
/// "start a new conversation".
pub const DEFAULT_CONVERSATION_ID: &str = "default";

const ASK_NAME_AFTER_GREETING: &str = "Hello! May I know your name?";
const ASK_NAME: &str = "May I know your name?";

fn name_greeting(name: &str) -> String {
    format!("Hello {name}! Nice to meet you 😊 How can I help you with POSSAP today?")
}

/// What this turn did, surfaced to the transport layer as state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    /// The session has no name yet; the reply asks for one.
    AskingForName,
    /// The message carried a name; the reply greets the visitor.
    NameCaptured,
    /// A regular answered turn.
    Answered,
}

/// The full result of one inbound message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub conversation_id: String,
    pub reply: String,
    pub raw_reply: String,
    pub relevant_faqs: Vec<FaqEntry>,
    pub context_used: bool,
    pub user_name: Option<String>,
    pub state: TurnState,
}

/// Session-aware conversational frontend over the response engine.
#[derive(Debug)]
pub struct ChatEngine {
    store: Arc<ConversationStore>,
    extractor: NameExtractor,
    engine: ResponseEngine,
    links: LinkRewriter,
}

impl ChatEngine {
    pub fn new(store: Arc<ConversationStore>, engine: ResponseEngine) -> Self {
        Self {
            store,
            extractor: NameExtractor::new(),
            engine,
            links: LinkRewriter::new(),
        }
    }

    /// Processes one inbound message. A missing or placeholder conversation
    /// id mints a fresh one, returned in the outcome so the caller can
    /// continue the session.
    pub async fn handle_message(
        &self,
        conversation_id: Option<&str>,
        message: &str,
    ) -> ChatOutcome {
        let conversation_id = match conversation_id {
            Some(id) if !id.is_empty() && id != DEFAULT_CONVERSATION_ID => id.to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                info!(conversation_id = %id, "Minted new conversation id");
                id
            }
        };

        let session = self.store.get_or_create(&conversation_id);

        if session.user_name.is_none() {
            return self.elicit_name(conversation_id, message);
        }

        // Active session: record the question, answer it with history, and
        // record the reply.
        self.store
            .append_turn(&conversation_id, Role::User, message);
        let history = self.store.recent_turns(&conversation_id, MAX_TURNS);
        let response = self
            .engine
            .generate_response(message, session.user_name.as_deref(), &history)
            .await;
        self.store
            .append_turn(&conversation_id, Role::Assistant, &response.raw_reply);

        ChatOutcome {
            conversation_id,
            reply: response.reply_with_links,
            raw_reply: response.raw_reply,
            relevant_faqs: response.relevant_faqs,
            context_used: response.context_used,
            user_name: session.user_name,
            state: TurnState::Answered,
        }
    }

    /// The pre-answering branch: capture a name or ask for one. A message
    /// that carries the name is consumed by the capture and is not recorded
    /// as a user turn; it was an introduction, not a question.
    fn elicit_name(&self, conversation_id: String, message: &str) -> ChatOutcome {
        if let Some(name) = self.extractor.extract(message) {
            self.store.set_name(&conversation_id, &name);
            let raw_reply = name_greeting(&name);
            self.store
                .append_turn(&conversation_id, Role::Assistant, &raw_reply);
            info!(user_name = %name, "Captured visitor name");
            return ChatOutcome {
                conversation_id,
                reply: self.links.rewrite(&raw_reply),
                raw_reply,
                relevant_faqs: Vec::new(),
                context_used: false,
                user_name: Some(name),
                state: TurnState::NameCaptured,
            };
        }

        let raw_reply = if is_greeting(message) {
            ASK_NAME_AFTER_GREETING
        } else {
            ASK_NAME
        };
        self.store
            .append_turn(&conversation_id, Role::Assistant, raw_reply);
        ChatOutcome {
            conversation_id,
            reply: raw_reply.to_string(),
            raw_reply: raw_reply.to_string(),
            relevant_faqs: Vec::new(),
            context_used: false,
            user_name: None,
            state: TurnState::AskingForName,
        }
    }
}
