#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use chrono::NaiveDate;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(&["blogforge-rs"]).unwrap();

        assert_eq!(args.topic, None);
        assert_eq!(args.output_path, PathBuf::from("./blogforge.out"));
        assert!(!args.verbose);
        assert!(!args.force_regenerate);
        assert!(!args.no_cache);
    }

    #[test]
    fn test_args_topic_positional() {
        let args = Args::try_parse_from(&[
            "blogforge-rs",
            "Binary search trees",
            "-o", "/test/output",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.topic, Some("Binary search trees".to_string()));
        assert_eq!(args.output_path, PathBuf::from("/test/output"));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_llm_options() {
        let args = Args::try_parse_from(&[
            "blogforge-rs",
            "topic",
            "--llm-provider", "openai",
            "--llm-api-key", "test-key",
            "--llm-api-base-url", "https://api.openai.com/v1",
            "--model", "gpt-4.1-mini",
            "--max-tokens", "2048",
            "--temperature", "0.7",
            "--max-parallels", "5",
        ])
        .unwrap();

        assert_eq!(args.llm_provider, Some("openai".to_string()));
        assert_eq!(args.llm_api_key, Some("test-key".to_string()));
        assert_eq!(args.model, Some("gpt-4.1-mini".to_string()));
        assert_eq!(args.max_tokens, Some(2048));
        assert_eq!(args.temperature, Some(0.7));
        assert_eq!(args.max_parallels, Some(5));
    }

    #[test]
    fn test_args_run_window_options() {
        let args = Args::try_parse_from(&[
            "blogforge-rs",
            "AI news this week",
            "--as-of", "2026-08-30",
            "--recency-days", "7",
            "--max-steps", "20",
        ])
        .unwrap();

        assert_eq!(args.as_of, Some(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()));
        assert_eq!(args.recency_days, Some(7));
        assert_eq!(args.max_steps, Some(20));
    }

    #[test]
    fn test_into_config_basic() {
        let args = Args::try_parse_from(&[
            "blogforge-rs",
            "Binary search trees",
            "-o", "/test/output",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.topic, "Binary search trees");
        assert_eq!(config.output_path, PathBuf::from("/test/output"));
        assert!(!config.force_regenerate);
        assert!(!config.verbose);
    }

    #[test]
    fn test_into_config_with_overrides() {
        let args = Args::try_parse_from(&[
            "blogforge-rs",
            "topic",
            "--force-regenerate",
            "--verbose",
            "--llm-provider", "deepseek",
            "--model", "deepseek-chat",
            "--recency-days", "14",
        ])
        .unwrap();

        let config = args.into_config();

        assert!(config.force_regenerate);
        assert!(config.verbose);
        assert_eq!(config.llm.provider, crate::config::LLMProvider::DeepSeek);
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.recency_days, 14);
    }

    #[test]
    fn test_into_config_no_cache() {
        let args = Args::try_parse_from(&["blogforge-rs", "topic", "--no-cache"]).unwrap();

        let config = args.into_config();
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_into_config_search_key() {
        let args = Args::try_parse_from(&[
            "blogforge-rs",
            "topic",
            "--search-api-key", "tvly-test",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.search.api_key, "tvly-test");
    }
}
