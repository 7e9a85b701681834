// crates/mp_config/src/lib.rs

//! Config Layer
//!
//! 配置层，提供算例文件、界面力类型和相界面力诊断对象的配置。
//!
//! # 模块概览
//!
//! - [`kind`]: `ForceKind` 五类界面力
//! - [`phase_forces`]: `PhaseForcesConfig` 诊断对象配置
//! - [`models`]: 闭合模型与混合方法配置
//! - [`case`]: `CaseConfig` 算例配置（JSON）
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: mp_cli         ─> CaseConfig::from_file
//! Layer 3: mp_interfacial ─> 将配置解析为模型对象
//! Layer 2: mp_config      ─> 本层
//! Layer 1: mp_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod error;
pub mod kind;
pub mod models;
pub mod phase_forces;

// 重导出核心类型
pub use case::{CaseConfig, MeshConfig, PairConfig, PhaseConfig, RunConfig, ScalarInit, VectorInit};
pub use error::ConfigError;
pub use kind::ForceKind;
pub use models::{
    BlendedModelConfig, BlendingConfig, DragModelConfig, LiftModelConfig, ModelConfig,
    TurbulentDispersionModelConfig, VirtualMassModelConfig, WallLubricationModelConfig,
};
pub use phase_forces::{ForceToggles, PhaseForcesConfig};
