//! # POSSAP Support Assistant
//!
//! This crate implements a conversational FAQ assistant for the POSSAP
//! service portal: per-visitor session state with name elicitation,
//! semantic retrieval over a fixed FAQ corpus, retrieval-augmented reply
//! generation through a configurable AI provider, and hyperlink
//! post-processing of generated text.

pub mod chat;
pub mod corpus;
pub mod elicitation;
pub mod engine;
pub mod errors;
pub mod links;
pub mod prompts;
pub mod providers;
pub mod retrieval;
pub mod store;

pub use chat::{ChatEngine, ChatOutcome, TurnState};
pub use corpus::{possap_faqs, Category, FaqEntry};
pub use engine::{EngineResponse, ResponseEngine};
pub use errors::AssistError;
pub use retrieval::{EmbeddedFaqIndex, EmbeddingEndpoint, FaqRetriever};
pub use store::{ConversationStore, Role, SessionSnapshot, Turn};
