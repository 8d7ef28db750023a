//! 网络检索客户端 - Tavily风格的HTTP检索服务
//!
//! 检索失败对运行不致命：调用方捕获SearchError并按零结果继续。

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::SearchConfig;

/// 检索服务的类型化失败
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("检索服务未配置API密钥")]
    Unauthenticated,
    #[error("检索服务不可用: {0}")]
    Unavailable(String),
}

/// 检索服务返回的原始结果行（规范化前）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Tavily响应的线上格式
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

/// 检索客户端
#[derive(Clone)]
pub struct SearchClient {
    config: SearchConfig,
    http: reqwest::Client,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// 执行单条查询，返回规范化后的结果行。
    /// 没有url的行直接丢弃。
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<RawSearchResult>, SearchError> {
        if self.config.api_key.trim().is_empty() {
            return Err(SearchError::Unauthenticated);
        }

        let body = json!({
            "api_key": self.config.api_key,
            "query": query,
            "max_results": max_results,
        });

        let response = self
            .http
            .post(format!("{}/search", self.config.api_base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let payload: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        Ok(Self::normalize(payload.results))
    }

    fn normalize(results: Vec<TavilyResult>) -> Vec<RawSearchResult> {
        results
            .into_iter()
            .filter_map(|r| {
                let url = r.url.unwrap_or_default();
                if url.trim().is_empty() {
                    return None;
                }
                Some(RawSearchResult {
                    title: r.title.unwrap_or_default(),
                    url,
                    snippet: r.content.unwrap_or_default(),
                    published_at: r.published_date,
                    source: r.source,
                })
            })
            .collect()
    }
}
