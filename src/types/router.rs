use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 写作模式 - 决定证据依赖程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlogMode {
    /// 常青主题，正确性不依赖新信息，不需要检索
    #[default]
    ClosedBook,
    /// 主体常青，但需要最新的示例/工具/模型信息
    Hybrid,
    /// 高度时效性主题（周报、最新动态、排名、定价、政策）
    OpenBook,
}

impl BlogMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogMode::ClosedBook => "closed_book",
            BlogMode::Hybrid => "hybrid",
            BlogMode::OpenBook => "open_book",
        }
    }
}

impl std::fmt::Display for BlogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Router阶段的结构化决策输出
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RouterDecision {
    /// 规划前是否需要进行网络检索
    pub needs_research: bool,
    pub mode: BlogMode,
    /// 一句话说明判定理由
    #[serde(default)]
    pub reason: String,
    /// needs_research=true时，3-10条高信号检索词
    #[serde(default)]
    pub queries: Vec<String>,
    /// 每条检索词期望的最大结果数
    #[serde(default)]
    pub max_results_per_query: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_mode_snake_case_roundtrip() {
        let json = serde_json::to_string(&BlogMode::OpenBook).unwrap();
        assert_eq!(json, "\"open_book\"");

        let mode: BlogMode = serde_json::from_str("\"closed_book\"").unwrap();
        assert_eq!(mode, BlogMode::ClosedBook);
    }

    #[test]
    fn test_router_decision_optional_fields() {
        // 模型可以省略reason/queries，缺省为空
        let decision: RouterDecision =
            serde_json::from_str(r#"{"needs_research": false, "mode": "closed_book"}"#).unwrap();
        assert!(!decision.needs_research);
        assert!(decision.queries.is_empty());
        assert!(decision.max_results_per_query.is_none());
    }
}
