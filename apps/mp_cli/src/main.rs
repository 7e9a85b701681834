// apps/mp_cli/src/main.rs

//! mp_cli - 界面力诊断工具
//!
//! 子命令：
//! - `run`: 按步执行算例中的全部相界面力对象，输出场统计
//! - `validate`: 检查算例配置能否构建
//! - `info`: 列出相、相对、各类力模型与输出场名
//!
//! 日志级别由 `--log-level` 给出；设置了 `RUST_LOG` 时以环境变量为准。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 欧拉-欧拉多相流界面力诊断
#[derive(Parser)]
#[command(name = "mp_cli", version, about = "Interfacial phase-force diagnostics", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value_t = Level::INFO)]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 执行算例并输出界面力场
    Run(commands::run::RunArgs),
    /// 显示算例信息
    Info(commands::info::InfoArgs),
    /// 验证算例配置
    Validate(commands::validate::ValidateArgs),
}

fn init_logging(level: Level) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("日志初始化失败: {e}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    match cli.command {
        Command::Run(args) => commands::run::execute(args),
        Command::Info(args) => commands::info::execute(args),
        Command::Validate(args) => commands::validate::execute(args),
    }
}
