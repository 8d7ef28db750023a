use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 规范化后的证据条目，url为唯一键
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub title: String,
    pub url: String,
    pub source: Option<String>,
    /// 发布日期；解析失败时保持None，绝不猜测
    pub published_at: Option<NaiveDate>,
    pub snippet: Option<String>,
}

/// LLM合成阶段的线上格式 - 日期仍为字符串，规范化在后处理完成
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceDraft {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub source: Option<String>,
    /// YYYY-MM-DD格式的发布日期，结果中未明确给出时为null
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// 证据合成调用的结构化输出
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct EvidencePack {
    #[serde(default)]
    pub evidence: Vec<EvidenceDraft>,
}

impl EvidenceDraft {
    /// 规范化为EvidenceItem。没有url的条目返回None（丢弃）；
    /// 无法按YYYY-MM-DD解析的日期归一为None。
    pub fn normalize(self) -> Option<EvidenceItem> {
        if self.url.trim().is_empty() {
            return None;
        }
        let published_at = self
            .published_at
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        Some(EvidenceItem {
            title: self.title,
            url: self.url,
            source: self.source,
            published_at,
            snippet: self.snippet,
        })
    }
}

impl EvidenceItem {
    /// 面向prompt的单行格式
    pub fn as_prompt_line(&self) -> String {
        let date = self
            .published_at
            .map(|d| d.to_string())
            .unwrap_or_else(|| "date:unknown".to_string());
        format!("- {} | {} | {}", self.title, self.url, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(url: &str, published_at: Option<&str>) -> EvidenceDraft {
        EvidenceDraft {
            title: "t".to_string(),
            url: url.to_string(),
            source: None,
            published_at: published_at.map(|s| s.to_string()),
            snippet: None,
        }
    }

    #[test]
    fn test_normalize_drops_urlless_items() {
        assert!(draft("", None).normalize().is_none());
        assert!(draft("   ", None).normalize().is_none());
        assert!(draft("https://example.com", None).normalize().is_some());
    }

    #[test]
    fn test_normalize_never_guesses_dates() {
        let item = draft("https://example.com", Some("last tuesday"))
            .normalize()
            .unwrap();
        assert!(item.published_at.is_none());

        let item = draft("https://example.com", Some("2026-08-01"))
            .normalize()
            .unwrap();
        assert_eq!(
            item.published_at,
            Some(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap())
        );
    }

    #[test]
    fn test_prompt_line_marks_unknown_dates() {
        let item = draft("https://example.com", None).normalize().unwrap();
        assert!(item.as_prompt_line().contains("date:unknown"));
    }
}
