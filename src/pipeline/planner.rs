use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::llm::client::LLMError;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;
use crate::types::evidence::EvidenceItem;
use crate::types::plan::{BlogKind, Plan};
use crate::types::router::BlogMode;

/// 规划prompt中最多引用的证据条数
const MAX_EVIDENCE_LINES: usize = 16;

const PLANNER_SYSTEM: &str = "\
You are a senior technical blog editor and writing planner.
Create a high-quality outline for a technical blog post.

Rules:
- blog_title: catchy but accurate.
- audience: concrete (e.g., \"backend engineers new to vector DBs\").
- 5-9 tasks. Tasks must be non-overlapping, each with a one-sentence goal and
  3-6 specific, actionable bullets.
- target_words between 120 and 550 per task.
- At least two of: code sketch, edge cases, performance/cost, security,
  observability must be covered somewhere in the plan.
- Set requires_research=true only for tasks that depend on recent facts.
- Set requires_citations=true for tasks that make factual claims about recent events.
- Set requires_code=true for tasks where a short code sample genuinely helps.

Grounding by mode:
- closed_book: do not depend on evidence at all.
- hybrid: evidence-informed but not mandatory per section; flag sections that
  need it via requires_research/requires_citations.
- open_book: every section summarizes events and their implications; no
  tutorial content unless explicitly requested. If the evidence is
  insufficient for a roundup, say so explicitly in the plan instead of
  inventing news. Never invent sources.";

/// 大纲规划阶段 - 单次结构化提取产出本次运行唯一的Plan
#[derive(Default)]
pub struct OutlinePlanner;

#[async_trait]
impl PipelineStage for OutlinePlanner {
    fn stage_name(&self) -> &'static str {
        "planner"
    }

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()> {
        println!("📝 开始大纲规划...");

        let user_prompt = build_planner_prompt(
            &state.topic,
            state.mode,
            &state.evidence,
            &state.as_of.to_string(),
        );

        let mut plan: Plan = context
            .extract_cached("planner", PLANNER_SYSTEM, &user_prompt)
            .await?;

        // 没有任何任务的大纲无法驱动后续阶段，视同不合Schema
        if plan.tasks.is_empty() {
            return Err(anyhow!(LLMError::SchemaViolation(
                "planner produced a plan with zero tasks".to_string()
            )));
        }

        enforce_open_book_kind(state.mode, &mut plan);

        println!(
            "✅ 大纲规划完成: \"{}\"，{}个章节，体裁={}",
            plan.blog_title,
            plan.tasks.len(),
            plan.blog_kind
        );
        if context.config.verbose {
            for task in &plan.tasks {
                println!("   {}. {} ({}词)", task.id, task.title, task.target_words);
            }
        }

        state.plan = Some(plan);
        Ok(())
    }
}

/// open_book运行一律按新闻综述体裁写作，无论模型返回什么。
/// 确定性改写，不触发重试。
pub fn enforce_open_book_kind(mode: BlogMode, plan: &mut Plan) {
    if mode == BlogMode::OpenBook {
        plan.blog_kind = BlogKind::NewsRoundup;
    }
}

fn build_planner_prompt(
    topic: &str,
    mode: BlogMode,
    evidence: &[EvidenceItem],
    as_of: &str,
) -> String {
    let mut prompt = format!("Topic: {}\nMode: {}\nAs of: {}\n", topic, mode, as_of);

    if !evidence.is_empty() {
        let lines: Vec<String> = evidence
            .iter()
            .take(MAX_EVIDENCE_LINES)
            .map(|e| e.as_prompt_line())
            .collect();
        prompt.push_str(&format!("\nEvidence:\n{}\n", lines.join("\n")));
    }

    prompt
}
