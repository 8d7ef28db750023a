use std::sync::Arc;

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    cache::CacheManager, config::Config, llm::client::LLMClient, search::SearchClient,
};

#[derive(Clone)]
pub struct PipelineContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 检索客户端
    pub search_client: SearchClient,
    /// 配置
    pub config: Config,
    /// 缓存管理器
    pub cache_manager: Arc<RwLock<CacheManager>>,
}

impl PipelineContext {
    /// 创建新的流水线上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.clone())?;
        let search_client = SearchClient::new(config.search.clone());
        let cache_manager = Arc::new(RwLock::new(CacheManager::new(config.cache.clone())));

        Ok(Self {
            llm_client,
            search_client,
            config,
            cache_manager,
        })
    }

    /// 带缓存的结构化提取。缓存键为system+user prompt的MD5，scope区分调用点。
    pub async fn extract_cached<T>(&self, scope: &str, system: &str, user: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let cache_key = format!("{}\n---\n{}", system, user);

        {
            let cache = self.cache_manager.read().await;
            if let Some(cached) = cache.get::<T>(scope, &cache_key).await {
                if self.config.verbose {
                    println!("   📦 命中缓存: {}", scope);
                }
                return Ok(cached);
            }
        }

        let result: T = self.llm_client.extract(system, user).await?;

        let cache = self.cache_manager.write().await;
        if let Err(e) = cache.store(scope, &cache_key, &result).await {
            eprintln!("⚠️ 缓存写入失败({}): {}", scope, e);
        }

        Ok(result)
    }

    /// 带缓存的自由文本对话
    pub async fn prompt_cached(&self, scope: &str, system: &str, user: &str) -> Result<String> {
        let cache_key = format!("{}\n---\n{}", system, user);

        {
            let cache = self.cache_manager.read().await;
            if let Some(cached) = cache.get::<String>(scope, &cache_key).await {
                if self.config.verbose {
                    println!("   📦 命中缓存: {}", scope);
                }
                return Ok(cached);
            }
        }

        let result = self.llm_client.prompt(system, user).await?;

        let cache = self.cache_manager.write().await;
        if let Err(e) = cache.store(scope, &cache_key, &result).await {
            eprintln!("⚠️ 缓存写入失败({}): {}", scope, e);
        }

        Ok(result)
    }
}
