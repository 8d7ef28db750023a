use anyhow::Result;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;
use crate::search::RawSearchResult;
use crate::types::evidence::{EvidenceItem, EvidencePack};
use crate::types::router::BlogMode;

const RESEARCH_SYSTEM: &str = "\
You are a research synthesizer for technical writing.
Given raw web search results, produce a deduplicated list of evidence items.

Rules:
- Only include items with a non-empty url.
- Prefer relevant + authoritative sources (company blogs, docs, reputable outlets).
- If a published date is explicitly present in the result payload, keep it as YYYY-MM-DD.
  If missing or unclear, set published_at=null. Do not guess.
- Keep snippets short.
- Deduplicate by url.";

/// 证据采集阶段：逐条执行检索，单次合成调用去重规范化，
/// 时效过滤只在open_book模式生效。
#[derive(Default)]
pub struct ResearchCollector;

#[async_trait]
impl PipelineStage for ResearchCollector {
    fn stage_name(&self) -> &'static str {
        "research"
    }

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()> {
        let max_queries = context.config.search.max_queries;
        let max_results = state
            .max_results_per_query
            .unwrap_or(context.config.search.max_results_per_query);

        let queries: Vec<String> = state.queries.iter().take(max_queries).cloned().collect();
        println!("🔍 开始检索，共{}条查询...", queries.len());

        let mut raw_results: Vec<RawSearchResult> = Vec::new();
        for query in &queries {
            match context.search_client.search(query, max_results).await {
                Ok(results) => {
                    if context.config.verbose {
                        println!("   ✓ \"{}\" -> {}条结果", query, results.len());
                    }
                    raw_results.extend(results);
                }
                Err(e) => {
                    // 单条查询失败不致命，按零结果继续
                    eprintln!("⚠️ 查询失败，按零结果继续: \"{}\": {}", query, e);
                }
            }
        }

        if raw_results.is_empty() {
            // 没有任何原始结果时直接短路，不浪费一次空输入的合成调用
            println!("⚠️ 检索无结果，证据集为空");
            state.evidence = Vec::new();
            return Ok(());
        }

        println!("🧪 合成证据中，原始结果{}条...", raw_results.len());
        let user_prompt = format!("Raw results:\n{}", format_raw_results(&raw_results));
        let pack: EvidencePack = context
            .extract_cached("research", RESEARCH_SYSTEM, &user_prompt)
            .await?;

        let normalized: Vec<EvidenceItem> = pack
            .evidence
            .into_iter()
            .filter_map(|draft| draft.normalize())
            .collect();

        let deduped = dedup_by_url(normalized);
        let evidence = if state.mode == BlogMode::OpenBook {
            filter_recent(deduped, state.as_of, state.recency_days)
        } else {
            deduped
        };

        println!("✅ 证据采集完成，共{}条", evidence.len());
        state.evidence = evidence;
        Ok(())
    }
}

fn format_raw_results(results: &[RawSearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. title: {}\n   url: {}\n   published_at: {}\n   source: {}\n   snippet: {}",
                i + 1,
                r.title,
                r.url,
                r.published_at.as_deref().unwrap_or("unknown"),
                r.source.as_deref().unwrap_or("unknown"),
                r.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 按url去重。重复时后写者胜出，但保留首次出现的位置。
pub fn dedup_by_url(items: Vec<EvidenceItem>) -> Vec<EvidenceItem> {
    let mut result: Vec<EvidenceItem> = Vec::new();
    let mut index_by_url: HashMap<String, usize> = HashMap::new();

    for item in items {
        match index_by_url.get(&item.url) {
            Some(&idx) => result[idx] = item,
            None => {
                index_by_url.insert(item.url.clone(), result.len());
                result.push(item);
            }
        }
    }
    result
}

/// 时效过滤：保留published_at在[as_of - recency_days, ∞)内的条目（边界含端点），
/// 无日期的条目一并剔除。只在open_book模式调用。
pub fn filter_recent(
    items: Vec<EvidenceItem>,
    as_of: NaiveDate,
    recency_days: i64,
) -> Vec<EvidenceItem> {
    let cutoff = as_of
        .checked_sub_days(Days::new(recency_days.max(0) as u64))
        .unwrap_or(NaiveDate::MIN);

    items
        .into_iter()
        .filter(|item| match item.published_at {
            Some(date) => date >= cutoff,
            None => false,
        })
        .collect()
}
