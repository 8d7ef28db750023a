use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;
use crate::types::image::ImagePlan;

pub mod materializer;

const DECIDE_IMAGE_SYSTEM: &str = "\
You are an art director for a technical blog.
Given the finished Markdown draft, decide where illustrations would genuinely help,
insert placeholders, and spec each image.

Rules:
- Return md_with_placeholders: the input Markdown VERBATIM except for inserted
  placeholder lines [[IMAGE_1]], [[IMAGE_2]], [[IMAGE_3]]. Do not rewrite,
  reorder, or delete any existing text.
- At most 3 images. Zero is a valid answer; if no image materially aids
  understanding, return the document unchanged and an empty image list.
- Every image must materially aid understanding (diagrams, flows,
  architecture), never decoration.
- Each image spec: placeholder matching one inserted token, a filesystem-safe
  filename ending in .png, concise alt text, a one-line caption, and a
  detailed generation prompt (style, subject, composition). No text in images.";

/// 配图规划阶段 - 在成稿中插入占位符并产出图像规格。
/// 原文逐字保真由代码兜底，不只依赖prompt约束。
#[derive(Default)]
pub struct ImagePlanner;

#[async_trait]
impl PipelineStage for ImagePlanner {
    fn stage_name(&self) -> &'static str {
        "image_planner"
    }

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()> {
        println!("🎨 开始配图规划...");

        let user_prompt = format!("Markdown draft:\n\n{}", state.merged_md);
        let plan: ImagePlan = context
            .extract_cached("images", DECIDE_IMAGE_SYSTEM, &user_prompt)
            .await
            .context("配图规划调用失败")?;

        if plan.images.is_empty() {
            // 不配图时正文必须与汇合产物逐字一致，丢弃模型可能的改写
            println!("🎨 配图规划完成: 本文不配图");
            state.md_with_placeholders = state.merged_md.clone();
            state.image_specs = Vec::new();
            return Ok(());
        }

        println!("🎨 配图规划完成: {}张图", plan.images.len());
        if context.config.verbose {
            for spec in &plan.images {
                println!("   🖼 {} -> {}", spec.placeholder, spec.filename);
            }
        }

        state.md_with_placeholders = plan.md_with_placeholders;
        state.image_specs = plan.images;
        Ok(())
    }
}
