//! # Semantic FAQ Retrieval
//!
//! The FAQ corpus is embedded once at startup; queries are embedded on
//! demand and ranked against the corpus by cosine similarity, best-first.
//! The corpus is small and read-only, so ranking happens in process with no
//! external vector store.

use crate::{
    corpus::FaqEntry,
    errors::AssistError,
    providers::ai::generate_embedding,
};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::Debug;
use tracing::info;

/// Where query and corpus embeddings come from.
#[derive(Debug, Clone)]
pub struct EmbeddingEndpoint {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// A trait for ranking the FAQ corpus against a free-text query.
///
/// Results come back best-first. An empty corpus yields an empty list.
#[async_trait]
pub trait FaqRetriever: Send + Sync + Debug {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<FaqEntry>, AssistError>;
}

#[derive(Debug, Clone)]
struct IndexedFaq {
    entry: FaqEntry,
    embedding: Vec<f32>,
}

/// The FAQ corpus with one embedding per entry.
#[derive(Debug)]
pub struct EmbeddedFaqIndex {
    endpoint: EmbeddingEndpoint,
    entries: Vec<IndexedFaq>,
}

impl EmbeddedFaqIndex {
    /// Embeds every corpus entry and builds the index. Called once at
    /// startup; a failure here is a deployment problem, not a per-request
    /// one.
    pub async fn build(
        endpoint: EmbeddingEndpoint,
        corpus: Vec<FaqEntry>,
    ) -> Result<Self, AssistError> {
        let mut entries = Vec::with_capacity(corpus.len());
        for entry in corpus {
            let embedding = generate_embedding(
                &endpoint.api_url,
                &endpoint.model,
                &entry.document_text(),
                endpoint.api_key.as_deref(),
            )
            .await?;
            entries.push(IndexedFaq { entry, embedding });
        }
        info!(total_faqs = entries.len(), "FAQ index built");
        Ok(Self { endpoint, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl FaqRetriever for EmbeddedFaqIndex {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<FaqEntry>, AssistError> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        let query_vector = generate_embedding(
            &self.endpoint.api_url,
            &self.endpoint.model,
            query,
            self.endpoint.api_key.as_deref(),
        )
        .await?;
        Ok(rank_by_similarity(&self.entries, &query_vector, k))
    }
}

fn rank_by_similarity(entries: &[IndexedFaq], query_vector: &[f32], k: usize) -> Vec<FaqEntry> {
    let mut scored: Vec<(f32, &FaqEntry)> = entries
        .iter()
        .map(|indexed| {
            (
                cosine_similarity(query_vector, &indexed.embedding),
                &indexed.entry,
            )
        })
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .take(k)
        .map(|(_, entry)| entry.clone())
        .collect()
}

/// Cosine similarity of two vectors. Zero for mismatched lengths or zero
/// norms.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
