use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::evidence::EvidenceItem;
use crate::types::image::ImageSpec;
use crate::types::plan::Plan;
use crate::types::router::BlogMode;

/// 单次运行的共享状态，依次流经各阶段。
///
/// 除`sections`外所有字段只被单一阶段写入一次；`sections`由多个并行的
/// 章节写作worker同时产出，合并语义为追加并集（append，绝不覆盖），
/// 写入顺序无约束，规范顺序在合并阶段按task id恢复。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogState {
    pub topic: String,
    pub mode: BlogMode,
    pub needs_research: bool,
    pub queries: Vec<String>,
    /// Router建议的单查询结果上限；None时采用配置默认值
    pub max_results_per_query: Option<u32>,
    pub evidence: Vec<EvidenceItem>,
    pub plan: Option<Plan>,
    pub as_of: NaiveDate,
    pub recency_days: i64,
    /// (task_id, markdown)的多重集合 - 唯一的累加字段
    pub sections: Vec<(u32, String)>,
    pub merged_md: String,
    pub md_with_placeholders: String,
    pub image_specs: Vec<ImageSpec>,
    pub final_md: String,
}

impl BlogState {
    /// 创建一次运行的初始状态，集合字段为空
    pub fn new(topic: &str, as_of: NaiveDate, recency_days: i64) -> Self {
        Self {
            topic: topic.to_string(),
            mode: BlogMode::default(),
            needs_research: false,
            queries: Vec::new(),
            max_results_per_query: None,
            evidence: Vec::new(),
            plan: None,
            as_of,
            recency_days,
            sections: Vec::new(),
            merged_md: String::new(),
            md_with_placeholders: String::new(),
            image_specs: Vec::new(),
            final_md: String::new(),
        }
    }

    /// 并入一批worker产出的章节。只追加，不覆盖已有条目；
    /// 该操作满足交换律与结合律，与worker完成顺序无关。
    pub fn append_sections(&mut self, batch: Vec<(u32, String)>) {
        self.sections.extend(batch);
    }
}

// Include tests
#[cfg(test)]
mod tests;
