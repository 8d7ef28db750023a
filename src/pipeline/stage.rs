use anyhow::Result;
use async_trait::async_trait;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::state::BlogState;

/// 流水线阶段trait - 每个阶段读取共享状态中它关心的字段，
/// 写入它负责产出的字段后返回。阶段内部有定义好回退的失败
/// 不得越过阶段边界，致命失败原样上抛给工作流引擎。
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// 阶段标识，用于日志
    fn stage_name(&self) -> &'static str;

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()>;
}
