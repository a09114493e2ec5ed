//! # Configuration Loading Tests

use possap_assist_server::config::get_config;

#[test]
fn defaults_apply_without_config_file() {
    let config = get_config(Some("/nonexistent/config.yml")).expect("defaults must load");

    assert_eq!(config.session_ttl_hours, 24);
    assert_eq!(config.sweep_interval_secs, 3600);
    assert_eq!(config.generation.provider, "anthropic");
    assert_eq!(config.generation.model_name, "claude-sonnet-4-5");
    assert!(config.generation.api_url.is_none());
    assert_eq!(config.embedding.model_name, "all-minilm");
}

#[test]
fn yaml_file_overrides_defaults_and_substitutes_env_vars() {
    std::env::set_var("POSSAP_ASSIST_TEST_GEN_KEY", "secret-key");

    let path = std::env::temp_dir().join("possap-assist-config-test.yml");
    std::fs::write(
        &path,
        r#"
session_ttl_hours: 48
generation:
  provider: local
  api_url: http://localhost:9000/v1/chat/completions
  api_key: ${POSSAP_ASSIST_TEST_GEN_KEY}
  model_name: test-model
embedding:
  api_url: http://localhost:9000/v1/embeddings
  model_name: test-embed
"#,
    )
    .expect("failed to write test config");

    let config = get_config(path.to_str()).expect("config file must load");

    assert_eq!(config.session_ttl_hours, 48);
    assert_eq!(config.generation.provider, "local");
    assert_eq!(config.generation.api_key.as_deref(), Some("secret-key"));
    assert_eq!(config.generation.model_name, "test-model");
    assert_eq!(config.embedding.api_url, "http://localhost:9000/v1/embeddings");
    // Unset fields keep their defaults.
    assert_eq!(config.sweep_interval_secs, 3600);
}
