use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::{Config, ImageConfig};
use crate::imagegen::ImageSynthesizer;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::BlogState;
use crate::types::image::ImageSpec;

/// 单张配图的落地结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 成功生成并落盘（或命中已有文件）
    Placed,
    /// 超时放弃等待，正文以"生成中"回退块占位
    FallbackTimeout,
    /// 生成失败，正文以错误回退块占位
    FallbackError(String),
}

/// 配图落地阶段 - 逐张生成图像、替换占位符并持久化最终文档。
/// 合成器句柄惰性构建，整个运行期间只存在一个实例，
/// 互斥锁保证同一时刻至多一个合成调用在途。
pub struct ImageMaterializer {
    synthesizer: Mutex<Option<Arc<ImageSynthesizer>>>,
}

impl Default for ImageMaterializer {
    fn default() -> Self {
        Self {
            synthesizer: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PipelineStage for ImageMaterializer {
    fn stage_name(&self) -> &'static str {
        "image_materializer"
    }

    async fn execute(&self, context: &PipelineContext, state: &mut BlogState) -> Result<()> {
        let blog_title = state
            .plan
            .as_ref()
            .context("配图落地阶段缺少大纲，流水线顺序被破坏")?
            .blog_title
            .clone();

        let mut final_md = state.md_with_placeholders.clone();

        if state.image_specs.is_empty() {
            // 不配图时不创建images目录，正文原样通过
            state.final_md = final_md;
            persist_document(&context.config, &blog_title, &state.final_md)?;
            return Ok(());
        }

        let images_dir = context.config.images_dir();
        std::fs::create_dir_all(&images_dir)
            .with_context(|| format!("无法创建图像目录: {:?}", images_dir))?;

        println!("🖼 开始图像落地，共{}张...", state.image_specs.len());
        let mut placed = 0usize;
        let mut fallbacks = 0usize;

        for spec in &state.image_specs {
            let outcome = self.materialize_one(context, &images_dir, spec).await?;
            match &outcome {
                Outcome::Placed => placed += 1,
                Outcome::FallbackTimeout => {
                    fallbacks += 1;
                    eprintln!("⚠️ 图像生成超时，回退占位: {}", spec.filename);
                }
                Outcome::FallbackError(detail) => {
                    fallbacks += 1;
                    eprintln!("⚠️ 图像生成失败，回退占位: {}: {}", spec.filename, detail);
                }
            }
            final_md = apply_outcome(&final_md, spec, &outcome);
        }

        println!("✅ 图像落地完成: {}张就位，{}张回退", placed, fallbacks);
        state.final_md = final_md;
        persist_document(&context.config, &blog_title, &state.final_md)?;
        Ok(())
    }
}

impl ImageMaterializer {
    /// 获取合成器句柄，首次访问时构建
    async fn handle(&self, config: &ImageConfig) -> Arc<ImageSynthesizer> {
        let mut guard = self.synthesizer.lock().await;
        match guard.as_ref() {
            Some(handle) => Arc::clone(handle),
            None => {
                if config.api_key.is_empty() {
                    eprintln!("⚠️ 图像服务未配置API KEY，生成预计会失败");
                }
                let handle = Arc::new(ImageSynthesizer::new(config.clone()));
                *guard = Some(Arc::clone(&handle));
                handle
            }
        }
    }

    async fn materialize_one(
        &self,
        context: &PipelineContext,
        images_dir: &Path,
        spec: &ImageSpec,
    ) -> Result<Outcome> {
        let target = images_dir.join(&spec.filename);
        // 同名文件已存在即命中，跳过合成
        if target.exists() {
            if context.config.verbose {
                println!("   📦 图像已存在，跳过生成: {}", spec.filename);
            }
            return Ok(Outcome::Placed);
        }

        let synthesizer = self.handle(&context.config.image).await;
        let prompt = spec.prompt.clone();
        let size = spec.size;
        let quality = spec.quality;

        // 合成跑在独立任务上，超时只是放弃等待，不打断已发出的请求
        let join =
            tokio::task::spawn(async move { synthesizer.synthesize(&prompt, size, quality).await });
        let timeout = Duration::from_secs(context.config.image.timeout_seconds);

        let outcome = match tokio::time::timeout(timeout, join).await {
            Err(_) => Outcome::FallbackTimeout,
            Ok(Err(join_err)) => Outcome::FallbackError(join_err.to_string()),
            Ok(Ok(Err(synth_err))) => Outcome::FallbackError(synth_err.to_string()),
            Ok(Ok(Ok(bytes))) => {
                std::fs::write(&target, &bytes)
                    .with_context(|| format!("无法写入图像文件: {:?}", target))?;
                if context.config.verbose {
                    println!("   💾 图像已保存: {} ({}字节)", spec.filename, bytes.len());
                }
                Outcome::Placed
            }
        };
        Ok(outcome)
    }
}

/// 以落地结果替换正文中的占位符
pub fn apply_outcome(md: &str, spec: &ImageSpec, outcome: &Outcome) -> String {
    let replacement = match outcome {
        Outcome::Placed => placed_block(spec),
        Outcome::FallbackTimeout => timeout_block(spec),
        Outcome::FallbackError(detail) => error_block(spec, detail),
    };
    md.replace(&spec.placeholder, &replacement)
}

fn placed_block(spec: &ImageSpec) -> String {
    format!("![{}](images/{})\n*{}*", spec.alt, spec.filename, spec.caption)
}

fn timeout_block(spec: &ImageSpec) -> String {
    format!("> 🖼 *{}* (image generation still in progress)", spec.caption)
}

/// 错误回退块保留caption/alt/prompt原文，便于事后手工补图
fn error_block(spec: &ImageSpec, detail: &str) -> String {
    format!(
        "> 🖼 *{}*\n> alt: {}\n> prompt: {}\n> error: {}",
        spec.caption, spec.alt, spec.prompt, detail
    )
}

/// 将最终文档写入输出目录
pub fn persist_document(config: &Config, blog_title: &str, final_md: &str) -> Result<()> {
    std::fs::create_dir_all(&config.output_path)
        .with_context(|| format!("无法创建输出目录: {:?}", config.output_path))?;
    let path = config.output_path.join(config.document_filename(blog_title));
    std::fs::write(&path, final_md).with_context(|| format!("无法写入文档: {:?}", path))?;
    println!("💾 文档已保存: {:?}", path);
    Ok(())
}
