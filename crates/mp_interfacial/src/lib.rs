// crates/mp_interfacial/src/lib.rs

//! 界面力模块
//!
//! 为欧拉-欧拉多相流计算各相所受的界面动量交换力，包括：
//! - 单元场存储与逐单元并行 (fields)
//! - 网格几何接口 (mesh)
//! - 相与相系统 (phase)
//! - 相对注册表 (pair)
//! - 流型混合权重 (blending)
//! - 闭合模型 (models) - 曳力、虚拟质量、升力、壁面润滑、湍流弥散
//! - 混合模型 (blended) - 三种流型下闭合模型的加权组合
//! - 界面力系统与累加 (interfacial, aggregator)
//! - 相界面力诊断对象 (phase_forces)
//! - 场输出 (sink)
//! - 由算例配置构建 (setup)
//!
//! # 数据流
//!
//! ```text
//! PhaseForces::execute
//!   └─ 每个开启的力类型: ForceAggregator::accumulate
//!        └─ 注册表给出包含该相的相对（注册顺序）
//!             └─ BlendedForceModel::evaluate（作用于 phase1）
//!                  └─ 按所在侧取正负号累加
//! PhaseForces::write -> FieldSink
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregator;
pub mod blended;
pub mod blending;
pub mod fields;
pub mod interfacial;
pub mod mesh;
pub mod models;
pub mod pair;
pub mod phase;
pub mod phase_forces;
pub mod setup;
pub mod sink;

// 重导出常用类型
pub use aggregator::{AccumulatedForce, ForceAggregator};
pub use blended::{blend_fields, BlendedForceModel, ModelView};
pub use blending::{
    BlendWeights, BlendingMethod, FnBlending, HyperbolicBlending, LinearBlending, LinearRamp,
    NoBlending,
};
pub use fields::{ParallelConfig, ScalarField, VectorField, DEFAULT_PARALLEL_THRESHOLD};
pub use interfacial::{InterfacialSystem, InterfacialSystemBuilder};
pub use mesh::{CellMesh, MeshFace, MeshGeometry};
pub use models::{
    AntalWallLubrication, ConstantLift, ConstantTurbulentDispersion, ConstantVirtualMass,
    ForceModel, LinearDrag, ModelContext, PrescribedForce, SchillerNaumannDrag,
};
pub use pair::{PairMembership, PairSide, PhasePair, PhasePairRegistry};
pub use phase::{Phase, PhaseSystem};
pub use phase_forces::{PhaseForces, TOTAL_FIELD};
pub use setup::{build_case, Case};
pub use sink::{FieldDatabase, FieldError, FieldSink, FieldSummary};

pub use mp_config::{ForceKind, PhaseForcesConfig};
pub use mp_foundation::{MpError, MpResult, PairIndex, PhaseIndex};
