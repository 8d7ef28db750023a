//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

mod providers;

use providers::ProviderClient;

/// LLM调用的类型化失败
///
/// 规划级调用（Router/Planner/Image Planner）遇到SchemaViolation时对整次运行致命，
/// 引擎不做静默重试，直接上抛给调用方。
#[derive(Debug, Error)]
pub enum LLMError {
    /// 模型输出无法按要求的Schema解析
    #[error("模型结构化输出不符合要求的Schema: {0}")]
    SchemaViolation(String),
    /// 模型服务本身不可达或返回错误
    #[error("模型服务调用失败: {0}")]
    Transport(String),
}

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self { client, config })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self
            .prompt("You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 结构化数据提取。输出无法解析为T时返回LLMError::SchemaViolation，
    /// 服务本身失败归为LLMError::Transport；调用方都不重试。
    pub async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let llm_config = &self.config.llm;
        let extractor =
            self.client
                .create_extractor::<T>(&llm_config.model, system_prompt, llm_config);

        extractor
            .extract(user_prompt)
            .await
            .map_err(anyhow::Error::new)
    }

    /// 单轮对话，返回自由文本
    pub async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let llm_config = &self.config.llm;
        let agent = self
            .client
            .create_agent(&llm_config.model, system_prompt, llm_config);

        agent
            .prompt(user_prompt)
            .await
            .map_err(|e| anyhow::Error::new(LLMError::Transport(e.to_string())))
    }
}
