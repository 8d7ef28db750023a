use crate::config::{Config, LLMProvider};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// BlogForge-RS - 由Rust与AI驱动的技术博客生成引擎
#[derive(Parser, Debug)]
#[command(name = "BlogForge (blogforge-rs)")]
#[command(
    about = "AI-based generation engine for technical blog posts. It routes the topic, optionally researches the web, plans an outline, writes sections in parallel and illustrates the final article."
)]
#[command(version)]
pub struct Args {
    /// 博客主题
    pub topic: Option<String>,

    /// 输出路径
    #[arg(short, long, default_value = "./blogforge.out")]
    pub output_path: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 基准日期 (YYYY-MM-DD)，"latest/this week"类主题以此为参照
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// 时效窗口（天），open_book模式据此过滤证据
    #[arg(long)]
    pub recency_days: Option<i64>,

    /// 工作流引擎的步数上限
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 章节写作的最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// LLM Provider (openai, deepseek, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 检索服务API KEY（Tavily）
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 强制重新生成（清除缓存）
    #[arg(long)]
    pub force_regenerate: bool,
}

impl Args {
    /// 将CLI参数转换为配置。配置文件先加载，CLI参数逐项覆盖
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|e| {
                panic!("❌ 无法读取配置文件 {:?}: {}", config_path, e)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("blogforge.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|e| {
                    panic!(
                        "❌ 无法读取默认配置文件 {:?}: {}",
                        default_config_path, e
                    )
                })
            } else {
                Config::default()
            }
        };

        // 主题：CLI参数优先级最高
        if let Some(topic) = self.topic {
            config.topic = topic;
        }
        config.output_path = self.output_path;

        if let Some(as_of) = self.as_of {
            config.as_of = as_of;
        }
        if let Some(recency_days) = self.recency_days {
            config.recency_days = recency_days;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels;
        }

        // 检索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 其他配置
        config.force_regenerate = self.force_regenerate;
        config.verbose = self.verbose;

        config
    }
}

// Include tests
#[cfg(test)]
mod tests;
