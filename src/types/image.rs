use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 固定的三档分辨率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1536")]
    Portrait,
    #[serde(rename = "1536x1024")]
    Landscape,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Portrait => "1024x1536",
            ImageSize::Landscape => "1536x1024",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Low => "low",
            ImageQuality::Medium => "medium",
            ImageQuality::High => "high",
        }
    }
}

/// 单张配图的规格
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImageSpec {
    /// 正文中的占位符，如 [[IMAGE_1]]
    pub placeholder: String,
    /// 保存在images/下的文件名，如 qkv_flow.png，全局唯一
    pub filename: String,
    pub alt: String,
    pub caption: String,
    /// 发送给图像模型的prompt
    pub prompt: String,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub quality: ImageQuality,
}

/// 配图规划调用的结构化输出
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImagePlan {
    /// 插入占位符后的全文；不需要配图时必须与输入逐字一致
    pub md_with_placeholders: String,
    #[serde(default)]
    pub images: Vec<ImageSpec>,
}
