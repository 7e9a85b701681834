// apps/mp_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示算例中的相、相对、各类力的模型与将要输出的场名。

use anyhow::{Context, Result};
use clap::Args;
use mp_config::{CaseConfig, ForceKind};
use mp_interfacial::{build_case, ModelView};
use std::path::{Path, PathBuf};
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 算例配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== MariPhase 信息 ===");

    print_system_info();

    if let Some(path) = &args.config {
        println!();
        print_case_info(path)?;
    }

    Ok(())
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("MariPhase CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
    println!("并行线程数: {}", available_threads());

    println!("\n界面力类型:");
    for kind in ForceKind::ALL {
        let scope = if kind.is_dispersed_only() { "仅分散" } else { "含分层" };
        println!("  - {} ({}, {})", kind, kind.key(), scope);
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn print_case_info(path: &Path) -> Result<()> {
    let config = CaseConfig::from_file(path)
        .with_context(|| format!("无法加载算例: {}", path.display()))?;
    let case = build_case(&config).context("算例构建失败")?;

    println!("=== 算例: {} ===", path.display());
    println!("单元数: {}", case.phases.n_cells());

    println!("\n相 ({}):", case.phases.n_phases());
    for (idx, phase) in case.phases.iter() {
        println!("  [{}] {}", idx, phase.name());
    }

    println!("\n相对 ({}):", case.interfacial.n_pairs());
    for (pair_idx, pair) in case.interfacial.registry().iter() {
        let first = case.phases.get(pair.first()).map_or("?", |p| p.name());
        let second = case.phases.get(pair.second()).map_or("?", |p| p.name());
        let blending = case.interfacial.blending(pair_idx).map_or("-", |b| b.name());
        println!("  {} <-> {} (混合: {})", first, second, blending);

        for kind in ForceKind::ALL {
            let Some(blended) = case.interfacial.blended(pair_idx, kind) else {
                continue;
            };
            let views: Vec<String> = ModelView::ALL
                .iter()
                .filter_map(|&view| blended.model(view).map(|m| format!("{}={}", view, m.name())))
                .collect();
            println!("    {}: {}", kind, views.join(", "));
        }
    }

    println!("\n输出场:");
    for pf in &case.phase_forces {
        for kind in pf.enabled_kinds() {
            println!("  {}", pf.field_name(kind));
        }
        println!("  {}", pf.total_field_name());
    }

    Ok(())
}
