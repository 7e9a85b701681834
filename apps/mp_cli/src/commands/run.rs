// apps/mp_cli/src/commands/run.rs

//! 运行算例命令
//!
//! 按步执行全部相界面力对象，每步写入场数据库，
//! 结束后将各场统计写出为 JSON。

use anyhow::{Context, Result};
use clap::Args;
use mp_config::CaseConfig;
use mp_interfacial::{build_case, FieldDatabase, FieldSummary};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 算例配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 输出目录（覆盖配置中的 run.output_dir）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 执行步数（覆盖配置中的 run.steps）
    #[arg(short = 'n', long)]
    pub steps: Option<u64>,
}

/// 单步输出记录
#[derive(Serialize)]
struct StepReport {
    step: u64,
    fields: Vec<FieldSummary>,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== MariPhase 界面力诊断启动 ===");

    let config = CaseConfig::from_file(&args.config)
        .with_context(|| format!("无法加载算例: {}", args.config.display()))?;
    let mut case = build_case(&config).context("算例构建失败")?;

    let steps = args.steps.unwrap_or(config.run.steps);
    let output_dir = args.output.unwrap_or_else(|| config.run.output_dir.clone());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("无法创建输出目录: {}", output_dir.display()))?;

    info!("单元数: {}", case.phases.n_cells());
    info!("相数: {}, 相对数: {}", case.phases.n_phases(), case.interfacial.n_pairs());
    info!("诊断对象数: {}", case.phase_forces.len());
    info!("执行步数: {}", steps);

    let start = Instant::now();
    let mut db = FieldDatabase::new();
    let mut reports = Vec::with_capacity(steps as usize);

    for step in 1..=steps {
        db.begin_step(step);
        case.run_step(&mut db)
            .with_context(|| format!("第 {} 步执行失败", step))?;

        let fields = db.summaries();
        for summary in &fields {
            debug!(
                "步 {} {}: |F|max = {:.6e}",
                step, summary.name, summary.max_magnitude
            );
        }
        reports.push(StepReport { step, fields });
    }

    let summary_path = output_dir.join("summary.json");
    let content = serde_json::to_string_pretty(&reports).context("统计序列化失败")?;
    std::fs::write(&summary_path, content)
        .with_context(|| format!("无法写入: {}", summary_path.display()))?;

    let elapsed = start.elapsed();
    info!("=== 计算完成 ===");
    info!("输出场数: {}", db.len());
    info!("计算时间: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    info!("统计文件: {}", summary_path.display());

    Ok(())
}
