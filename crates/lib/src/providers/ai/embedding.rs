//! # Embeddings Provider
//!
//! Generates vector embeddings by calling an external, OpenAI-compatible
//! embeddings API.

use crate::errors::AssistError;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Debug)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize, Debug)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize, Debug)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Generates a vector embedding for a given text input using an external API.
pub async fn generate_embedding(
    api_url: &str,
    model: &str,
    input: &str,
    api_key: Option<&str>,
) -> Result<Vec<f32>, AssistError> {
    let client = ReqwestClient::new();
    let request_body = EmbeddingRequest { model, input };
    debug!(payload = ?request_body, "--> Sending request to embeddings API");

    let mut request_builder = client.post(api_url).json(&request_body);
    if let Some(key) = api_key {
        request_builder = request_builder.bearer_auth(key);
    }

    let response = request_builder
        .send()
        .await
        .map_err(AssistError::AiRequest)?;

    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AssistError::AiApi(error_text));
    }

    let embedding_response: EmbeddingResponse = response
        .json()
        .await
        .map_err(AssistError::AiDeserialization)?;

    embedding_response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| AssistError::AiApi("Embeddings API returned no embeddings".to_string()))
}
