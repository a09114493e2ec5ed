//! # Shared Test Doubles
//!
//! Mock collaborators used across the workspace's tests: a programmable
//! AI provider and a scripted FAQ retriever. Both record their calls so
//! tests can assert on the prompts and queries they received.

use async_trait::async_trait;
use possap_assist::errors::AssistError;
use possap_assist::providers::ai::{AiProvider, ChatMessage, GenerationParams};
use possap_assist::retrieval::FaqRetriever;
use possap_assist::FaqEntry;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// One recorded `generate` invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
    pub params: GenerationParams,
}

#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<Vec<(String, String)>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a response. The key is matched as a substring of the
    /// system prompt or of any message content; entries are tried in
    /// insertion order.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), response.to_string()));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<String, AssistError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            messages: messages.to_vec(),
            params,
        });

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) || messages.iter().any(|m| m.content.contains(key)) {
                return Ok(response.clone());
            }
        }

        Err(AssistError::AiApi(format!(
            "MockAiProvider: no response programmed for this prompt. System prompt was: '{system_prompt}'"
        )))
    }
}

// --- Scripted Retriever ---

/// A retriever that returns pre-scripted FAQ hits for queries containing a
/// given key, and nothing otherwise.
#[derive(Debug, Default)]
pub struct ScriptedRetriever {
    scripts: Arc<Mutex<Vec<(String, Vec<FaqEntry>)>>>,
    queries: Arc<Mutex<Vec<(String, usize)>>>,
    fail: bool,
}

impl ScriptedRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// A retriever whose every call fails, for degradation tests.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Registers FAQ hits for queries containing `key` (case-insensitive).
    pub fn add_script(&self, key: &str, faqs: Vec<FaqEntry>) {
        let mut scripts = self.scripts.lock().unwrap();
        scripts.push((key.to_lowercase(), faqs));
    }

    /// The `(query, k)` pairs this retriever has been asked for.
    pub fn get_queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl FaqRetriever for ScriptedRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<FaqEntry>, AssistError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), k));

        if self.fail {
            return Err(AssistError::AiApi("scripted retrieval failure".to_string()));
        }

        let lowered = query.to_lowercase();
        let scripts = self.scripts.lock().unwrap();
        for (key, faqs) in scripts.iter() {
            if lowered.contains(key) {
                return Ok(faqs.iter().take(k).cloned().collect());
            }
        }
        Ok(Vec::new())
    }
}
