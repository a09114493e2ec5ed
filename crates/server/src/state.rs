//! # Application State
//!
//! The shared state (`AppState`) handed to every request handler, and the
//! startup logic that builds it: instantiating the configured generation
//! provider, embedding the FAQ corpus into the retrieval index, and wiring
//! the chat engine on top of the conversation store.

use crate::config::AppConfig;
use possap_assist::{
    links::LinkRewriter,
    possap_faqs,
    providers::ai::{anthropic::AnthropicProvider, local::LocalAiProvider, AiProvider},
    ChatEngine, ConversationStore, EmbeddedFaqIndex, EmbeddingEndpoint, FaqRetriever,
    ResponseEngine,
};
use std::sync::Arc;
use tracing::{info, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const LOCAL_API_URL_FALLBACK: &str = "http://localhost:1234/v1/chat/completions";

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The single owner of all conversation sessions.
    pub store: Arc<ConversationStore>,
    /// The conversational frontend handling every `/chat` turn.
    pub chat: Arc<ChatEngine>,
    /// The semantic FAQ index, also exposed directly via `/search`.
    pub retriever: Arc<dyn FaqRetriever>,
    /// Rewrites emails and URLs in text into HTML anchors.
    pub links: LinkRewriter,
    /// Size of the indexed corpus, reported by `/health`.
    pub total_faqs: usize,
}

/// Builds the shared application state from the configuration.
///
/// Embedding the corpus requires the embeddings endpoint to be reachable;
/// a failure here aborts startup rather than degrading every later request.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider: Box<dyn AiProvider> = match config.generation.provider.as_str() {
        "anthropic" => {
            let api_key = config.generation.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("generation.api_key is required for the anthropic provider")
            })?;
            let api_url = config
                .generation
                .api_url
                .clone()
                .unwrap_or_else(|| ANTHROPIC_API_URL.to_string());
            Box::new(AnthropicProvider::new(
                api_url,
                api_key,
                config.generation.model_name.clone(),
            )?)
        }
        "local" => {
            let api_url = config.generation.api_url.clone().unwrap_or_else(|| {
                warn!(
                    "generation.api_url is not set. Falling back to default: {}",
                    LOCAL_API_URL_FALLBACK
                );
                LOCAL_API_URL_FALLBACK.to_string()
            });
            Box::new(LocalAiProvider::new(
                api_url,
                config.generation.api_key.clone(),
                Some(config.generation.model_name.clone()),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported generation provider: {other}"));
        }
    };

    let corpus = possap_faqs();
    let total_faqs = corpus.len();
    let endpoint = EmbeddingEndpoint {
        api_url: config.embedding.api_url.clone(),
        model: config.embedding.model_name.clone(),
        api_key: config.embedding.api_key.clone(),
    };
    info!(total_faqs, "Embedding FAQ corpus");
    let retriever: Arc<dyn FaqRetriever> =
        Arc::new(EmbeddedFaqIndex::build(endpoint, corpus).await?);

    let store = Arc::new(ConversationStore::new());
    let engine = ResponseEngine::new(retriever.clone(), ai_provider);
    let chat = Arc::new(ChatEngine::new(store.clone(), engine));

    Ok(AppState {
        config: Arc::new(config),
        store,
        chat,
        retriever,
        links: LinkRewriter::new(),
        total_faqs,
    })
}
