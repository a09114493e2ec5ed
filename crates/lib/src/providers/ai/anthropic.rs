use crate::{
    errors::AssistError,
    providers::ai::{AiProvider, ChatMessage, GenerationParams},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

// --- Anthropic Messages API request and response structures ---

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

// --- Anthropic Provider implementation ---

/// A provider for interacting with the Anthropic Messages API.
#[derive(Clone, Debug)]
pub struct AnthropicProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    /// Creates a new `AnthropicProvider`.
    pub fn new(api_url: String, api_key: String, model: String) -> Result<Self, AssistError> {
        if api_key.is_empty() {
            return Err(AssistError::MissingApiKey);
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(AssistError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<String, AssistError> {
        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system: system_prompt,
            messages: messages
                .iter()
                .map(|m| AnthropicMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request_body)
            .send()
            .await
            .map_err(AssistError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistError::AiApi(error_text));
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(AssistError::AiDeserialization)?;

        let raw_response = anthropic_response
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default();

        Ok(raw_response)
    }
}
