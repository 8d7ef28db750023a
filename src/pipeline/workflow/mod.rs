use anyhow::{Result, bail};

use crate::config::Config;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::images::materializer::ImageMaterializer;
use crate::pipeline::images::ImagePlanner;
use crate::pipeline::merger::SectionMerger;
use crate::pipeline::planner::OutlinePlanner;
use crate::pipeline::research::ResearchCollector;
use crate::pipeline::router::{NextStage, Router, route_next};
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;
use crate::pipeline::writer::SectionWriters;

/// 工作流的全部阶段。两路分支只出现在Router之后，
/// 其余转移均为线性。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Router,
    Research,
    Planner,
    Writers,
    Merge,
    PlanImages,
    Materialize,
    Done,
}

/// 给定当前阶段与阶段执行后的状态，判定下一阶段
fn next_stage(current: Stage, state: &BlogState) -> Stage {
    match current {
        Stage::Router => match route_next(state) {
            NextStage::Research => Stage::Research,
            NextStage::Planner => Stage::Planner,
        },
        Stage::Research => Stage::Planner,
        Stage::Planner => Stage::Writers,
        Stage::Writers => Stage::Merge,
        Stage::Merge => Stage::PlanImages,
        Stage::PlanImages => Stage::Materialize,
        Stage::Materialize => Stage::Done,
        Stage::Done => Stage::Done,
    }
}

/// 启动一次完整的博客生成运行
pub async fn launch(config: Config) -> Result<BlogState> {
    if config.topic.trim().is_empty() {
        bail!("未指定博客主题");
    }

    println!("🚀 BlogForge启动: \"{}\"", config.topic);
    let context = PipelineContext::new(config.clone())?;

    context.llm_client.check_connection().await?;

    if config.force_regenerate {
        println!("🔄 强制重新生成，清除缓存...");
        context.cache_manager.write().await.clear().await?;
    }

    let router = Router;
    let research = ResearchCollector;
    let planner = OutlinePlanner;
    let writers = SectionWriters;
    let merger = SectionMerger;
    let image_planner = ImagePlanner;
    let materializer = ImageMaterializer::default();

    let mut state = BlogState::new(&config.topic, config.as_of, config.recency_days);
    let mut stage = Stage::Router;
    let mut steps = 0u32;

    while stage != Stage::Done {
        steps += 1;
        if steps > config.max_steps {
            bail!("工作流超过步数上限({})，强制终止", config.max_steps);
        }

        let current: &dyn PipelineStage = match stage {
            Stage::Router => &router,
            Stage::Research => &research,
            Stage::Planner => &planner,
            Stage::Writers => &writers,
            Stage::Merge => &merger,
            Stage::PlanImages => &image_planner,
            Stage::Materialize => &materializer,
            Stage::Done => break,
        };

        if config.verbose {
            println!("▶️ 阶段[{}]: {}", steps, current.stage_name());
        }
        current.execute(&context, &mut state).await?;
        stage = next_stage(stage, &state);
    }

    print_run_summary(&state);
    Ok(state)
}

fn print_run_summary(state: &BlogState) {
    println!("\n📊 运行摘要");
    println!("   主题: {}", state.topic);
    println!("   模式: {}", state.mode);
    if let Some(plan) = &state.plan {
        println!("   标题: {}", plan.blog_title);
        println!("   体裁: {}", plan.blog_kind);
    }
    println!("   证据: {}条", state.evidence.len());
    println!("   章节: {}节", state.sections.len());
    println!("   配图: {}张", state.image_specs.len());
    println!("   正文: {}字符", state.final_md.len());
}

// Include tests
#[cfg(test)]
mod tests;
