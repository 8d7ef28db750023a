use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;
use crate::types::evidence::EvidenceItem;
use crate::types::plan::{Plan, Task};
use crate::types::router::BlogMode;
use crate::utils::threads::do_parallel_with_limit;

/// 单个worker的prompt中最多引用的证据条数
const MAX_EVIDENCE_LINES: usize = 20;

const WORKER_SYSTEM: &str = "\
You are a technical blog section writer.
Write exactly one section of a larger blog post, in Markdown.

Rules:
- Output only the Markdown body, starting with a '## {section title}' heading.
  No document title, no preamble, no closing remarks.
- Cover every bullet, in order, without skipping or merging any.
- Stay within +/-15% of the target word count.
- If the blog kind is news_roundup, no tutorial or how-to framing unless a
  bullet explicitly asks for it.
- If evidence is provided, every external factual claim must cite a URL drawn
  only from that evidence, inline as [title](url). Flag unsupported claims
  instead of inventing sources or dates.
- If the task requires code, include at least one minimal, correct code block.";

/// 扇出快照：单个章节任务的全部只读输入。
/// worker之间不共享可变状态，产出(task_id, markdown)由调用方合并回共享状态。
#[derive(Debug, Clone)]
pub struct WorkUnit {
    pub task: Task,
    pub plan: Plan,
    pub topic: String,
    pub mode: BlogMode,
    pub as_of: NaiveDate,
    pub recency_days: i64,
    pub evidence: Vec<EvidenceItem>,
}

/// 从共享状态切出每个任务的工作单元。Plan缺失时由调用方先行校验。
pub fn fanout(state: &BlogState, plan: &Plan) -> Vec<WorkUnit> {
    plan.tasks
        .iter()
        .map(|task| WorkUnit {
            task: task.clone(),
            plan: plan.clone(),
            topic: state.topic.clone(),
            mode: state.mode,
            as_of: state.as_of,
            recency_days: state.recency_days,
            evidence: state.evidence.clone(),
        })
        .collect()
}

/// 章节写作阶段 - 按任务扇出，受限并行，完成后将全部产出追加回状态
#[derive(Default)]
pub struct SectionWriters;

#[async_trait]
impl PipelineStage for SectionWriters {
    fn stage_name(&self) -> &'static str {
        "writer"
    }

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()> {
        let plan = state
            .plan
            .clone()
            .context("章节写作阶段缺少大纲，流水线顺序被破坏")?;

        let units = fanout(state, &plan);
        let max_parallels = context.config.llm.max_parallels;
        println!(
            "✍️ 开始章节写作，共{}个任务，最大并行度{}...",
            units.len(),
            max_parallels
        );

        let futures: Vec<_> = units
            .into_iter()
            .map(|unit| write_section(context, unit))
            .collect();
        let results = do_parallel_with_limit(futures, max_parallels).await;

        let mut batch: Vec<(u32, String)> = Vec::with_capacity(results.len());
        for result in results {
            // 任一worker失败即整次运行失败，不做静默重试
            batch.push(result?);
        }

        println!("✅ 章节写作完成，共{}节", batch.len());
        state.append_sections(batch);
        Ok(())
    }
}

async fn write_section(context: &PipelineContext, unit: WorkUnit) -> Result<(u32, String)> {
    let task_id = unit.task.id;
    let user_prompt = build_worker_prompt(&unit);
    let scope = format!("writer/task_{}", task_id);

    let section = context
        .prompt_cached(&scope, WORKER_SYSTEM, &user_prompt)
        .await
        .with_context(|| format!("章节任务{}写作失败", task_id))?;

    if context.config.verbose {
        println!("   ✓ 章节{}完成 ({}字符)", task_id, section.len());
    }
    Ok((task_id, section))
}

fn build_worker_prompt(unit: &WorkUnit) -> String {
    let task = &unit.task;
    let mut prompt = format!(
        "Blog: {}\nAudience: {}\nTone: {}\nKind: {}\nTopic: {}\nAs of: {} (recency days={})\n\n\
         Section task #{}: {}\nGoal: {}\nTarget words: {}\nBullets:\n{}\n",
        unit.plan.blog_title,
        unit.plan.audience,
        unit.plan.tone,
        unit.plan.blog_kind,
        unit.topic,
        unit.as_of,
        unit.recency_days,
        task.id,
        task.title,
        task.goal,
        task.target_words,
        task.bullets
            .iter()
            .map(|b| format!("- {}", b))
            .collect::<Vec<_>>()
            .join("\n"),
    );

    let mut flags = Vec::new();
    if task.requires_citations {
        flags.push("citations required");
    }
    if task.requires_code {
        flags.push("code sample required");
    }
    if !flags.is_empty() {
        prompt.push_str(&format!("Requirements: {}\n", flags.join(", ")));
    }

    let needs_evidence =
        unit.mode == BlogMode::OpenBook || task.requires_citations || task.requires_research;
    if !unit.evidence.is_empty() && needs_evidence {
        let lines: Vec<String> = unit
            .evidence
            .iter()
            .take(MAX_EVIDENCE_LINES)
            .map(|e| e.as_prompt_line())
            .collect();
        prompt.push_str(&format!("\nEvidence:\n{}\n", lines.join("\n")));
    }

    prompt
}
