use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::llm::client::LLMError;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;
use crate::types::router::{BlogMode, RouterDecision};

const ROUTER_SYSTEM: &str = "\
You are a routing module for a technical blog planner.
Decide whether web research is needed before planning.

Modes:
- closed_book (needs_research=false):
  Evergreen topics where correctness does not depend on recent facts (concepts, fundamentals).
- hybrid (needs_research=true):
  Mostly evergreen but needs up-to-date examples/tools/models to be useful.
- open_book (needs_research=true):
  Mostly volatile: weekly roundups, \"this week\", \"latest\", rankings, pricing, policy/regulation.

If needs_research=true:
- Output 3-10 high-signal queries.
- Queries should be scoped and specific (avoid generic queries like just \"AI\" or \"LLM\").
- If the user asked for \"last week/this week/latest\", reflect that constraint in the queries.";

/// Router阶段 - 仅凭topic判定检索必要性与写作模式
#[derive(Default)]
pub struct Router;

/// Router之后的两路分支，引擎只在此处做一次条件跳转
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStage {
    Research,
    Planner,
}

/// 契约收敛：closed_book蕴含不检索，hybrid/open_book蕴含检索。
/// mode为准，needs_research按mode改写。
fn enforce_decision_contract(decision: &mut RouterDecision) {
    match decision.mode {
        BlogMode::ClosedBook => decision.needs_research = false,
        BlogMode::Hybrid | BlogMode::OpenBook => decision.needs_research = true,
    }
}

/// 判定Router之后的去向
pub fn route_next(state: &BlogState) -> NextStage {
    if state.needs_research {
        NextStage::Research
    } else {
        NextStage::Planner
    }
}

#[async_trait]
impl PipelineStage for Router {
    fn stage_name(&self) -> &'static str {
        "router"
    }

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()> {
        let user_prompt = format!("Topic: {}", state.topic);

        let mut decision: RouterDecision = context
            .extract_cached("router", ROUTER_SYSTEM, &user_prompt)
            .await?;

        enforce_decision_contract(&mut decision);
        // 需要检索却没有查询词，等同于不合Schema的输出，对运行致命
        if decision.needs_research && decision.queries.is_empty() {
            return Err(anyhow!(LLMError::SchemaViolation(
                "router decision requires research but carries no queries".to_string()
            )));
        }

        if context.config.verbose && !decision.reason.is_empty() {
            println!("   🔀 路由理由: {}", decision.reason);
        }
        println!(
            "🔀 路由判定: mode={}, needs_research={}, queries={}",
            decision.mode,
            decision.needs_research,
            decision.queries.len()
        );

        state.mode = decision.mode;
        state.needs_research = decision.needs_research;
        state.queries = decision.queries;
        state.max_results_per_query = decision.max_results_per_query;

        Ok(())
    }
}
