//! # Response Engine
//!
//! Orchestrates one answering turn: retrieve grounding FAQs, assemble the
//! prompt, call the generation provider, and hyperlink the output. Both
//! collaborators can fail; the engine absorbs every failure and always
//! produces a response, degrading to an uncontextualized answer or to a
//! fixed fallback reply.

use crate::{
    corpus::FaqEntry,
    links::LinkRewriter,
    prompts::{
        CONTEXT_HEADER, FALLBACK_REPLY, GENERAL_USER_PROMPT, RAG_USER_PROMPT,
        SUPPORT_SYSTEM_PROMPT,
    },
    providers::ai::{AiProvider, ChatMessage, GenerationParams},
    retrieval::FaqRetriever,
    store::{Role, Turn},
};
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, warn};

/// How many FAQs ground a chat answer.
pub const CHAT_TOP_K: usize = 3;
/// How many FAQs the direct search endpoint returns.
pub const SEARCH_TOP_K: usize = 5;
/// How many history turns are forwarded to the model.
const HISTORY_WINDOW: usize = 6;

/// The outcome of one answering turn.
#[derive(Debug, Clone, Serialize)]
pub struct EngineResponse {
    pub reply_with_links: String,
    pub raw_reply: String,
    pub relevant_faqs: Vec<FaqEntry>,
    pub context_used: bool,
}

/// Retrieval-augmented answer generation.
#[derive(Debug)]
pub struct ResponseEngine {
    retriever: Arc<dyn FaqRetriever>,
    ai: Box<dyn AiProvider>,
    links: LinkRewriter,
}

impl ResponseEngine {
    pub fn new(retriever: Arc<dyn FaqRetriever>, ai: Box<dyn AiProvider>) -> Self {
        Self {
            retriever,
            ai,
            links: LinkRewriter::new(),
        }
    }

    /// Generates a grounded reply for `query`. Never fails: collaborator
    /// errors degrade to an answer without context or to the fixed fallback
    /// reply.
    pub async fn generate_response(
        &self,
        query: &str,
        user_name: Option<&str>,
        history: &[Turn],
    ) -> EngineResponse {
        let relevant_faqs = match self.retriever.retrieve(query, CHAT_TOP_K).await {
            Ok(faqs) => faqs,
            Err(e) => {
                warn!(error = %e, "FAQ retrieval failed, answering without context");
                Vec::new()
            }
        };

        let context = build_context_block(&relevant_faqs);
        let system_prompt = build_system_prompt(user_name);
        let messages = build_messages(context.as_deref(), query, history);

        debug!(
            faqs = relevant_faqs.len(),
            history_turns = messages.len() - 1,
            "--> Sending prompt to AI provider"
        );

        let params = GenerationParams {
            max_tokens: 300,
            temperature: 0.7,
        };
        match self.ai.generate(&system_prompt, &messages, params).await {
            Ok(raw_reply) => EngineResponse {
                reply_with_links: self.links.rewrite(&raw_reply),
                raw_reply,
                context_used: !relevant_faqs.is_empty(),
                relevant_faqs,
            },
            Err(e) => {
                warn!(error = %e, "Generation failed, returning fallback reply");
                EngineResponse {
                    reply_with_links: self.links.rewrite(FALLBACK_REPLY),
                    raw_reply: FALLBACK_REPLY.to_string(),
                    relevant_faqs: Vec::new(),
                    context_used: false,
                }
            }
        }
    }
}

/// Renders retrieved FAQs as a numbered Q/A block, or `None` when there is
/// nothing to ground on.
fn build_context_block(faqs: &[FaqEntry]) -> Option<String> {
    if faqs.is_empty() {
        return None;
    }
    let mut block = String::from(CONTEXT_HEADER);
    for (i, faq) in faqs.iter().enumerate() {
        let _ = write!(block, "FAQ {}:\nQ: {}\nA: {}\n\n", i + 1, faq.question, faq.answer);
    }
    Some(block)
}

fn build_system_prompt(user_name: Option<&str>) -> String {
    let user_context = match user_name {
        Some(name) => format!("The user's name is {name}."),
        None => String::new(),
    };
    SUPPORT_SYSTEM_PROMPT.replace("{user_context}", &user_context)
}

/// Maps the most recent history turns to provider messages and appends the
/// final user message carrying the context block and the question.
fn build_messages(context: Option<&str>, query: &str, history: &[Turn]) -> Vec<ChatMessage> {
    let skip = history.len().saturating_sub(HISTORY_WINDOW);
    let mut messages: Vec<ChatMessage> = history[skip..]
        .iter()
        .map(|turn| match turn.role {
            Role::User => ChatMessage::user(turn.content.clone()),
            Role::Assistant => ChatMessage::assistant(turn.content.clone()),
        })
        .collect();

    let final_prompt = match context {
        Some(ctx) => RAG_USER_PROMPT
            .replace("{context}", ctx)
            .replace("{question}", query),
        None => GENERAL_USER_PROMPT.replace("{question}", query),
    };
    messages.push(ChatMessage::user(final_prompt));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Category;
    use crate::errors::AssistError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct StubRetriever {
        faqs: Vec<FaqEntry>,
        fail: bool,
    }

    #[async_trait]
    impl FaqRetriever for StubRetriever {
        async fn retrieve(&self, _query: &str, k: usize) -> Result<Vec<FaqEntry>, AssistError> {
            if self.fail {
                return Err(AssistError::AiApi("index unavailable".to_string()));
            }
            Ok(self.faqs.iter().take(k).cloned().collect())
        }
    }

    #[derive(Debug, Clone)]
    struct StubProvider {
        reply: Option<String>,
        calls: Arc<Mutex<Vec<(String, Vec<ChatMessage>)>>>,
    }

    impl StubProvider {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn last_call(&self) -> (String, Vec<ChatMessage>) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl AiProvider for StubProvider {
        async fn generate(
            &self,
            system_prompt: &str,
            messages: &[ChatMessage],
            _params: GenerationParams,
        ) -> Result<String, AssistError> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), messages.to_vec()));
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(AssistError::AiApi("quota exceeded".to_string())),
            }
        }
    }

    fn payment_faq() -> FaqEntry {
        FaqEntry {
            question: "How do I get a refund?".to_string(),
            answer: "Email info@possap.gov.ng with your receipt.".to_string(),
            category: Category::Payment,
        }
    }

    fn turn(role: Role, content: &str) -> Turn {
        Turn {
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn grounds_reply_in_retrieved_faqs() {
        let provider = StubProvider::replying("Check your invoice on www.possap.gov.ng!");
        let engine = ResponseEngine::new(
            Arc::new(StubRetriever {
                faqs: vec![payment_faq()],
                fail: false,
            }),
            Box::new(provider.clone()),
        );

        let response = engine.generate_response("refund please", None, &[]).await;

        assert!(response.context_used);
        assert_eq!(response.relevant_faqs.len(), 1);
        assert_eq!(response.relevant_faqs[0].category, Category::Payment);
        assert_eq!(response.raw_reply, "Check your invoice on www.possap.gov.ng!");
        assert!(response.reply_with_links.contains("<a href=\"https://possap.gov.ng\""));

        let (_, messages) = provider.last_call();
        let final_message = &messages.last().unwrap().content;
        assert!(final_message.contains("FAQ 1:"));
        assert!(final_message.contains("How do I get a refund?"));
        assert!(final_message.contains("User Question: refund please"));
    }

    #[tokio::test]
    async fn system_prompt_carries_user_name_when_known() {
        let provider = StubProvider::replying("Happy to help!");
        let engine = ResponseEngine::new(
            Arc::new(StubRetriever {
                faqs: vec![],
                fail: false,
            }),
            Box::new(provider.clone()),
        );

        engine.generate_response("hi", Some("Ada"), &[]).await;
        let (system, _) = provider.last_call();
        assert!(system.contains("The user's name is Ada."));

        engine.generate_response("hi", None, &[]).await;
        let (system, _) = provider.last_call();
        assert!(!system.contains("The user's name is"));
    }

    #[tokio::test]
    async fn forwards_at_most_six_history_turns() {
        let provider = StubProvider::replying("ok");
        let engine = ResponseEngine::new(
            Arc::new(StubRetriever {
                faqs: vec![],
                fail: false,
            }),
            Box::new(provider.clone()),
        );

        let history: Vec<Turn> = (0..9)
            .map(|i| {
                let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
                turn(role, &format!("turn {i}"))
            })
            .collect();

        engine.generate_response("latest", None, &history).await;
        let (_, messages) = provider.last_call();

        // Six history turns plus the final question message.
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0].content, "turn 3");
        assert_eq!(messages[0].role, crate::providers::ai::ChatRole::Assistant);
        assert_eq!(messages[1].role, crate::providers::ai::ChatRole::User);
        assert!(messages[6].content.contains("User Question: latest"));
    }

    #[tokio::test]
    async fn retrieval_failure_degrades_to_no_context() {
        let provider = StubProvider::replying("General advice.");
        let engine = ResponseEngine::new(
            Arc::new(StubRetriever {
                faqs: vec![payment_faq()],
                fail: true,
            }),
            Box::new(provider.clone()),
        );

        let response = engine.generate_response("refund", None, &[]).await;

        assert!(!response.context_used);
        assert!(response.relevant_faqs.is_empty());
        assert_eq!(response.raw_reply, "General advice.");

        let (_, messages) = provider.last_call();
        let final_message = &messages.last().unwrap().content;
        assert!(!final_message.contains("FAQ 1:"));
        assert!(final_message.contains("User Question: refund"));
    }

    #[tokio::test]
    async fn generation_failure_returns_fallback() {
        let engine = ResponseEngine::new(
            Arc::new(StubRetriever {
                faqs: vec![payment_faq()],
                fail: false,
            }),
            Box::new(StubProvider::failing()),
        );

        let response = engine.generate_response("refund", Some("Ada"), &[]).await;

        assert_eq!(response.raw_reply, FALLBACK_REPLY);
        assert!(response.relevant_faqs.is_empty());
        assert!(!response.context_used);
        assert!(response
            .reply_with_links
            .contains("<a href=\"mailto:support@possap.gov.ng\""));
    }
}
