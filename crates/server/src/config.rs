//! # Application Configuration
//!
//! Defines the configuration structure for the server and the logic for
//! loading it from an optional `config.yml` plus environment variables.
//! Environment variables referenced as `${VAR}` inside the YAML file are
//! substituted before parsing, and `POSSAP_`-prefixed variables override
//! nested keys (e.g. `POSSAP_EMBEDDING__API_URL`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Hours of inactivity before a conversation is eligible for sweeping.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// Seconds between sweep runs.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// The text-generation provider configuration.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// The text embedding endpoint used to index and query the FAQ corpus.
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_session_ttl_hours() -> i64 {
    24
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

/// Configuration for the text-generation provider.
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// The type of provider ("anthropic" or "local").
    #[serde(default = "default_generation_provider")]
    pub provider: String,
    /// The API URL. Optional for Anthropic where it can be derived.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_generation_model")]
    pub model_name: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_generation_provider(),
            api_url: None,
            api_key: None,
            model_name: default_generation_model(),
        }
    }
}

fn default_generation_provider() -> String {
    "anthropic".to_string()
}

fn default_generation_model() -> String {
    "claude-sonnet-4-5".to_string()
}

/// Configuration for the embedding endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_api_url")]
    pub api_url: String,
    #[serde(default = "default_embedding_model")]
    pub model_name: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_url: default_embedding_api_url(),
            model_name: default_embedding_model(),
            api_key: None,
        }
    }
}

fn default_embedding_api_url() -> String {
    "http://localhost:1234/v1/embeddings".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

// Reads a file and substitutes `${VAR}` references from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// Layering, lowest priority first: hardcoded defaults, an optional
/// `config.yml` (with `${VAR}` substitution), plain environment variables
/// for top-level keys like `PORT`, and `POSSAP_`-prefixed variables for
/// nested overrides.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = config_path_override.unwrap_or("config.yml");
    if let Some(content) = read_and_substitute(config_path)? {
        info!("Loading configuration from '{config_path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("POSSAP")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
