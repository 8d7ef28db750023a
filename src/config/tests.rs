use crate::config::{CacheConfig, Config, ImageConfig, LLMConfig, LLMProvider, SearchConfig};
use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.topic.is_empty());
    assert_eq!(config.recency_days, 3650);
    assert_eq!(config.output_path, PathBuf::from("."));
    assert_eq!(config.max_steps, 50);
    assert!(!config.force_regenerate);
    assert!(!config.verbose);
}

#[test]
fn test_llm_provider_default() {
    let provider = LLMProvider::default();
    assert_eq!(provider, LLMProvider::OpenAI);
}

#[test]
fn test_llm_provider_from_str() {
    assert_eq!(
        "openai".parse::<LLMProvider>().unwrap(),
        LLMProvider::OpenAI
    );
    assert_eq!(
        "deepseek".parse::<LLMProvider>().unwrap(),
        LLMProvider::DeepSeek
    );
    assert_eq!(
        "anthropic".parse::<LLMProvider>().unwrap(),
        LLMProvider::Anthropic
    );
    assert_eq!(
        "ollama".parse::<LLMProvider>().unwrap(),
        LLMProvider::Ollama
    );

    assert!("invalid".parse::<LLMProvider>().is_err());
}

#[test]
fn test_llm_provider_display() {
    assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
    assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
    assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
    assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
}

#[test]
fn test_llm_config_default() {
    let config = LLMConfig::default();

    assert_eq!(config.provider, LLMProvider::OpenAI);
    // api_key may be empty if env var is not set
    assert!(!config.api_base_url.is_empty());
    assert!(!config.model.is_empty());
    assert_eq!(config.max_tokens, 16384);
    assert_eq!(config.temperature, 0.3);
    assert_eq!(config.max_parallels, 3);
}

#[test]
fn test_search_config_default() {
    let config = SearchConfig::default();

    assert_eq!(config.api_base_url, "https://api.tavily.com");
    assert_eq!(config.max_results_per_query, 6);
    assert_eq!(config.max_queries, 10);
}

#[test]
fn test_image_config_default() {
    let config = ImageConfig::default();

    assert!(!config.api_base_url.is_empty());
    assert!(!config.model.is_empty());
    assert_eq!(config.timeout_seconds, 10);
}

#[test]
fn test_cache_config_default() {
    let config = CacheConfig::default();

    assert!(config.enabled);
    assert_eq!(config.cache_dir, PathBuf::from(".blogforge/cache"));
    assert_eq!(config.expire_hours, 8760); // 1 year
}

#[test]
fn test_document_filename_from_title() {
    let config = Config::default();
    assert_eq!(
        config.document_filename("Binary Search Trees"),
        "binary_search_trees.md"
    );
    assert_eq!(config.document_filename("???"), "blog.md");
}

#[test]
fn test_images_dir_under_output_path() {
    let mut config = Config::default();
    config.output_path = PathBuf::from("/tmp/out");
    assert_eq!(config.images_dir(), PathBuf::from("/tmp/out/images"));
}

#[test]
fn test_from_file_partial_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("blogforge.toml");

    let config_content = r#"topic = "Intro to Rust lifetimes"
recency_days = 14
as_of = "2026-08-30"

[llm]
model = "gpt-4.1-mini"
max_parallels = 5

[search]
max_results_per_query = 8
"#;
    std::fs::write(&config_path, config_content).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.topic, "Intro to Rust lifetimes");
    assert_eq!(config.recency_days, 14);
    assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
    assert_eq!(config.llm.max_parallels, 5);
    assert_eq!(config.search.max_results_per_query, 8);
    // 未出现在文件中的字段保持默认
    assert_eq!(config.max_steps, 50);
}

#[test]
fn test_from_file_missing() {
    let result = Config::from_file(&PathBuf::from("/nonexistent/blogforge.toml"));
    assert!(result.is_err());
}

#[test]
fn test_from_file_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("blogforge.toml");
    std::fs::write(&config_path, "not valid = [toml").unwrap();

    assert!(Config::from_file(&config_path).is_err());
}
