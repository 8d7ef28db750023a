//! 图像合成客户端
//!
//! 接口契约：`synthesize(prompt, size, quality) -> bytes`。超时由调用方
//! （Image Materializer）施加，本接口自身不设墙钟限制。

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::ImageConfig;
use crate::types::image::{ImageQuality, ImageSize};

/// 图像合成的类型化失败。对运行不致命，调用方以回退文本块继续。
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("图像服务返回错误: {0}")]
    Service(String),
    #[error("图像服务响应缺少图像数据")]
    EmptyResponse,
    #[error("图像请求失败: {0}")]
    Http(String),
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

/// 图像合成器 - Materializer持有的显式资源句柄。
/// 同一时刻只允许一个合成调用在途（由持有方的互斥锁保证）。
pub struct ImageSynthesizer {
    config: ImageConfig,
    http: reqwest::Client,
}

impl ImageSynthesizer {
    pub fn new(config: ImageConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// 生成一张图像并返回其字节
    pub async fn synthesize(
        &self,
        prompt: &str,
        size: ImageSize,
        quality: ImageQuality,
    ) -> Result<Vec<u8>, SynthesisError> {
        let body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "n": 1,
            "size": size.as_str(),
            "quality": quality.as_str(),
            "response_format": "url",
        });

        let response = self
            .http
            .post(format!("{}/images/generations", self.config.api_base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Service(format!("HTTP {}: {}", status, detail)));
        }

        let payload: ImagesResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::Service(e.to_string()))?;

        let image_url = payload
            .data
            .into_iter()
            .filter_map(|d| d.url)
            .next()
            .ok_or(SynthesisError::EmptyResponse)?;

        // 按返回的URL下载图像字节
        let image = self
            .http
            .get(&image_url)
            .send()
            .await
            .map_err(|e| SynthesisError::Http(e.to_string()))?;

        if !image.status().is_success() {
            return Err(SynthesisError::Service(format!(
                "图像下载失败: HTTP {}",
                image.status()
            )));
        }

        let bytes = image
            .bytes()
            .await
            .map_err(|e| SynthesisError::Http(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
