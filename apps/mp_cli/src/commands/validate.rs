// apps/mp_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 解析并校验算例，再尝试构建完整的相系统与界面力系统。

use anyhow::{bail, Result};
use clap::Args;
use mp_config::{CaseConfig, ForceKind, PairConfig};
use mp_foundation::MpError;
use mp_interfacial::build_case;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 算例配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn passed(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== MariPhase 算例验证 ===");
    println!("\n检查算例: {}", args.config.display());

    let mut result = ValidationResult::default();

    match CaseConfig::from_file(&args.config) {
        Ok(config) => check_case(&config, &mut result),
        Err(e) => result.add_error(format!("配置解析失败: {}", e)),
    }

    print_validation_result(&result, args.strict)
}

fn check_case(config: &CaseConfig, result: &mut ValidationResult) {
    for pair in &config.pairs {
        let n_models: usize = ForceKind::ALL
            .iter()
            .map(|&kind| pair_model_count(pair, kind))
            .sum();
        if n_models == 0 {
            result.add_warning(format!("相对 {} 未配置任何模型", pair.label()));
        }
    }

    for pf in &config.phase_forces {
        if !ForceKind::ALL.iter().any(|&k| pf.forces.is_enabled(k)) {
            result.add_warning(format!("相 {} 的诊断对象未开启任何力类型", pf.phase_name));
        }
    }

    match build_case(config) {
        Ok(case) => {
            println!("  ✓ 算例构建成功");
            println!("    单元数: {}", case.phases.n_cells());
            println!("    相对数: {}", case.interfacial.n_pairs());
        }
        Err(e) => {
            let category = match &e {
                MpError::Config { .. } | MpError::InvalidConfig { .. } | MpError::MissingConfig { .. } => "配置",
                MpError::SizeMismatch { .. } => "尺寸",
                _ => "构建",
            };
            result.add_error(format!("{}错误: {}", category, e));
        }
    }
}

fn pair_model_count(pair: &PairConfig, kind: ForceKind) -> usize {
    match kind {
        ForceKind::Drag => pair.drag.count(),
        ForceKind::VirtualMass => pair.virtual_mass.count(),
        ForceKind::Lift => pair.lift.count(),
        ForceKind::WallLubrication => pair.wall_lubrication.count(),
        ForceKind::TurbulentDispersion => pair.turbulent_dispersion.count(),
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    if result.passed(strict) {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
