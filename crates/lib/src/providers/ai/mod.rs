pub mod anthropic;
pub mod embedding;
pub mod local;

use crate::errors::AssistError;
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use embedding::generate_embedding;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A single entry in the message list sent to a text-generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Sampling temperature and output ceiling for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
        }
    }
}

/// A trait for interacting with a text-generation provider.
///
/// This defines a common interface for producing a reply from a system
/// instruction and an ordered message list, so the concrete provider
/// (Anthropic, a local OpenAI-compatible server) is swappable without
/// touching orchestration logic.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response for the given system prompt and message list.
    async fn generate(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<String, AssistError>;
}

dyn_clone::clone_trait_object!(AiProvider);
