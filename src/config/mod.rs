use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 博客主题
    pub topic: String,

    /// 基准日期，"latest/this week"类主题以此为参照
    pub as_of: NaiveDate,

    /// 时效窗口（天），open_book模式据此过滤证据
    pub recency_days: i64,

    /// 输出目录（最终Markdown与images/落在这里）
    pub output_path: PathBuf,

    /// 工作流引擎的步数上限
    pub max_steps: u32,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 检索配置
    pub search: SearchConfig,

    /// 图像生成配置
    pub image: ImageConfig,

    /// 缓存配置
    pub cache: CacheConfig,

    /// 强制重新生成（清除缓存）
    pub force_regenerate: bool,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 模型名称
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 章节写作的最大并发数
    pub max_parallels: usize,
}

/// 检索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// 检索服务API KEY（Tavily）
    pub api_key: String,

    /// 检索服务基地址
    pub api_base_url: String,

    /// 单条查询的默认最大结果数
    pub max_results_per_query: u32,

    /// 单次运行最多消费的查询条数
    pub max_queries: usize,
}

/// 图像生成配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ImageConfig {
    /// 图像服务API KEY，缺省复用LLM的KEY
    pub api_key: String,

    /// 图像服务基地址
    pub api_base_url: String,

    /// 图像模型名称
    pub model: String,

    /// 单张图像生成的墙钟超时（秒）
    pub timeout_seconds: u64,
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 最终文档的落盘文件名（不含目录）
    pub fn document_filename(&self, blog_title: &str) -> String {
        format!("{}.md", crate::utils::slug::safe_slug(blog_title))
    }

    /// 生成图像的存放目录
    pub fn images_dir(&self) -> PathBuf {
        self.output_path.join("images")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: String::new(),
            as_of: chrono::Local::now().date_naive(),
            recency_days: 3650,
            output_path: PathBuf::from("."),
            max_steps: 50,
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            image: ImageConfig::default(),
            cache: CacheConfig::default(),
            force_regenerate: false,
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("BLOGFORGE_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("gpt-4.1-mini"),
            max_tokens: 16384,
            temperature: 0.3,
            max_parallels: 3,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("BLOGFORGE_SEARCH_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            max_results_per_query: 6,
            max_queries: 10,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("BLOGFORGE_IMAGE_API_KEY")
                .or_else(|_| std::env::var("BLOGFORGE_LLM_API_KEY"))
                .unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("gpt-image-1"),
            timeout_seconds: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: PathBuf::from(".blogforge/cache"),
            expire_hours: 8760,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
