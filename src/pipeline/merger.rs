use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;

/// 汇合阶段 - 恢复章节的规范顺序并拼装成完整文稿。
/// 纯确定性操作，不发起任何LLM调用。
#[derive(Default)]
pub struct SectionMerger;

#[async_trait]
impl PipelineStage for SectionMerger {
    fn stage_name(&self) -> &'static str {
        "merger"
    }

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()> {
        let plan = state
            .plan
            .as_ref()
            .context("汇合阶段缺少大纲，流水线顺序被破坏")?;

        state.merged_md = merge_sections(&plan.blog_title, &state.sections);

        println!(
            "🔗 章节汇合完成，共{}节，{}字符",
            state.sections.len(),
            state.merged_md.len()
        );
        if context.config.verbose {
            let mut ids: Vec<u32> = state.sections.iter().map(|(id, _)| *id).collect();
            ids.sort_unstable();
            println!("   章节顺序: {:?}", ids);
        }
        Ok(())
    }
}

/// 按task id升序排列章节，以空行分隔拼接，冠以一级标题。
/// 与worker完成顺序无关。
pub fn merge_sections(blog_title: &str, sections: &[(u32, String)]) -> String {
    let mut ordered: Vec<&(u32, String)> = sections.iter().collect();
    ordered.sort_by_key(|(id, _)| *id);

    let body = ordered
        .iter()
        .map(|(_, md)| md.trim())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("# {}\n\n{}\n", blog_title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_restores_canonical_order() {
        // 完成顺序与规范顺序相反
        let sections = vec![
            (3, "## C\nbody c".to_string()),
            (1, "## A\nbody a".to_string()),
            (2, "## B\nbody b".to_string()),
        ];
        let merged = merge_sections("Title", &sections);
        assert_eq!(merged, "# Title\n\n## A\nbody a\n\n## B\nbody b\n\n## C\nbody c\n");
    }

    #[test]
    fn test_merge_is_independent_of_completion_order() {
        let a = vec![(1, "one".to_string()), (2, "two".to_string())];
        let b = vec![(2, "two".to_string()), (1, "one".to_string())];
        assert_eq!(merge_sections("T", &a), merge_sections("T", &b));
    }

    #[test]
    fn test_merge_trims_section_whitespace() {
        let sections = vec![(1, "\n\n## A\nbody\n\n".to_string())];
        let merged = merge_sections("T", &sections);
        assert_eq!(merged, "# T\n\n## A\nbody\n");
    }
}
