//! # Common Test Utilities
//!
//! `TestApp` spawns the real Axum application on a random port, with the
//! embeddings and chat-completions endpoints served by an
//! `httpmock::MockServer`. The corpus is embedded against the mock at
//! startup, so the harness registers a catch-all embeddings mock before
//! building the application state.

#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use possap_assist_server::{
    config::{AppConfig, EmbeddingConfig, GenerationConfig},
    router::create_router,
    state::build_app_state,
};
use reqwest::Client;
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();

        // The FAQ corpus is embedded at startup; serve every embedding
        // request with a fixed vector.
        mock_server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/v1/embeddings");
            then.status(200)
                .json_body(json!({ "data": [{ "embedding": [0.1, 0.2, 0.3] }] }));
        });

        let config = AppConfig {
            port: 0,
            session_ttl_hours: 24,
            sweep_interval_secs: 3600,
            generation: GenerationConfig {
                provider: "local".to_string(),
                api_url: Some(mock_server.url("/v1/chat/completions")),
                api_key: None,
                model_name: "mock-model".to_string(),
            },
            embedding: EmbeddingConfig {
                api_url: mock_server.url("/v1/embeddings"),
                model_name: "mock-embedding-model".to_string(),
                api_key: None,
            },
        };

        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        // Give the server a moment to start up.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Registers a chat-completions mock that always replies with `content`.
    pub fn mock_generation(&self, content: &str) -> httpmock::Mock<'_> {
        let content = content.to_string();
        self.mock_server.mock(move |when, then| {
            when.method(httpmock::Method::POST)
                .path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": content } }]
            }));
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
