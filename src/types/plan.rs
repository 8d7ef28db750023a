use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 博客体裁
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub enum BlogKind {
    #[default]
    Explainer,
    Tutorial,
    #[serde(rename = "news_roundup")]
    NewsRoundup,
    Comparison,
    #[serde(rename = "System_Design")]
    SystemDesign,
}

impl BlogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogKind::Explainer => "Explainer",
            BlogKind::Tutorial => "Tutorial",
            BlogKind::NewsRoundup => "news_roundup",
            BlogKind::Comparison => "Comparison",
            BlogKind::SystemDesign => "System_Design",
        }
    }
}

impl std::fmt::Display for BlogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 一个章节写作任务。id在Plan内唯一，并定义章节的规范顺序。
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    pub id: u32,
    pub title: String,
    /// 一句话描述读者读完本节后应该理解/能做什么
    pub goal: String,
    /// 3-6条具体的、互不重叠的要点
    pub bullets: Vec<String>,
    /// 目标字数（120-550）
    pub target_words: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requires_research: bool,
    #[serde(default)]
    pub requires_citations: bool,
    #[serde(default)]
    pub requires_code: bool,
}

/// 大纲规划结果。每次运行恰好产生一个Plan；tasks顺序即章节规范顺序。
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Plan {
    pub blog_title: String,
    pub audience: String,
    pub tone: String,
    #[serde(default)]
    pub blog_kind: BlogKind,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&BlogKind::NewsRoundup).unwrap(),
            "\"news_roundup\""
        );
        assert_eq!(
            serde_json::to_string(&BlogKind::SystemDesign).unwrap(),
            "\"System_Design\""
        );
        assert_eq!(
            serde_json::to_string(&BlogKind::Explainer).unwrap(),
            "\"Explainer\""
        );
    }

    #[test]
    fn test_task_flag_defaults() {
        let task: Task = serde_json::from_str(
            r#"{"id": 1, "title": "Intro", "goal": "Understand", "bullets": ["a","b","c"], "target_words": 200}"#,
        )
        .unwrap();
        assert!(!task.requires_research);
        assert!(!task.requires_citations);
        assert!(!task.requires_code);
        assert!(task.tags.is_empty());
    }
}
