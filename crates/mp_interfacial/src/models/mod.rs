// crates/mp_interfacial/src/models/mod.rs

//! 界面力闭合模型
//!
//! 每个模型针对相对的一个有序视角（分散相 d、连续相 c）给出作用于分散相的
//! 逐单元力密度 [N/m³]：
//!
//! | 类型 | 模型 |
//! |------|------|
//! | Drag | [`SchillerNaumannDrag`], [`LinearDrag`] |
//! | VirtualMass | [`ConstantVirtualMass`] |
//! | Lift | [`ConstantLift`] |
//! | WallLubrication | [`AntalWallLubrication`] |
//! | TurbulentDispersion | [`ConstantTurbulentDispersion`] |
//! | 任意 | [`PrescribedForce`] |
//!
//! # 设计
//!
//! 所有模型实现 [`ForceModel`]，只读访问 [`ModelContext`]。
//! 输入越界或结果非有限时返回 `MpError::Evaluation`，不产生部分结果。

pub mod drag;
pub mod lift;
pub mod prescribed;
pub mod turbulent_dispersion;
pub mod virtual_mass;
pub mod wall_lubrication;

pub use drag::{LinearDrag, SchillerNaumannDrag};
pub use lift::ConstantLift;
pub use prescribed::PrescribedForce;
pub use turbulent_dispersion::ConstantTurbulentDispersion;
pub use virtual_mass::ConstantVirtualMass;
pub use wall_lubrication::AntalWallLubrication;

use glam::DVec3;
use mp_config::ForceKind;
use mp_foundation::{MpError, MpResult};
use std::fmt;

use crate::fields::{map_cells, ParallelConfig, VectorField};
use crate::mesh::MeshGeometry;
use crate::phase::Phase;

/// 模型求值上下文
#[derive(Clone, Copy)]
pub struct ModelContext<'a> {
    /// 网格
    pub mesh: &'a dyn MeshGeometry,
    /// 分散相
    pub dispersed: &'a Phase,
    /// 连续相
    pub continuous: &'a Phase,
    /// 逐单元并行配置
    pub parallel: ParallelConfig,
}

impl<'a> ModelContext<'a> {
    /// 创建上下文
    pub fn new(mesh: &'a dyn MeshGeometry, dispersed: &'a Phase, continuous: &'a Phase) -> Self {
        Self {
            mesh,
            dispersed,
            continuous,
            parallel: ParallelConfig::default(),
        }
    }

    /// 设置并行配置
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.mesh.n_cells()
    }

    /// 相对速度 U_d - U_c
    #[inline]
    pub fn slip_velocity(&self, cell: usize) -> DVec3 {
        self.dispersed.velocity[cell] - self.continuous.velocity[cell]
    }
}

impl fmt::Debug for ModelContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext")
            .field("dispersed", &self.dispersed.name())
            .field("continuous", &self.continuous.name())
            .field("n_cells", &self.n_cells())
            .finish()
    }
}

/// 界面力闭合模型
pub trait ForceModel: Send + Sync + fmt::Debug {
    /// 力类型
    fn kind(&self) -> ForceKind;

    /// 模型名称
    fn name(&self) -> &str;

    /// 作用于分散相的逐单元力密度 [N/m³]
    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField>;
}

/// 逐单元求值并检查结果
///
/// 单元函数返回 `Err(reason)` 或非有限向量时，整体以 `MpError::Evaluation` 失败。
pub fn evaluate_cells<F>(model: &str, ctx: &ModelContext<'_>, f: F) -> MpResult<VectorField>
where
    F: Fn(usize) -> Result<DVec3, String> + Send + Sync,
{
    let values = map_cells(ctx.n_cells(), ctx.parallel, |cell| {
        let v = f(cell).map_err(|reason| MpError::evaluation(model, cell, reason))?;
        if !v.is_finite() {
            return Err(MpError::evaluation(model, cell, format!("结果非有限: {}", v)));
        }
        Ok(v)
    })?;
    Ok(VectorField::from(values))
}

/// 检查单元值为正且有限
#[inline]
pub(crate) fn positive(name: &str, value: f64) -> Result<f64, String> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{} 必须为正: {}", name, value))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::two_phase;
    use super::*;

    #[test]
    fn test_evaluate_cells_wraps_failure() {
        let (mesh, air, water) = two_phase(5);
        let ctx = ModelContext::new(mesh.as_ref(), &air, &water);
        let err = evaluate_cells("Test", &ctx, |cell| {
            if cell == 3 {
                Err("bad".to_string())
            } else {
                Ok(DVec3::X)
            }
        })
        .unwrap_err();
        assert!(matches!(err, MpError::Evaluation { cell: 3, .. }));
    }

    #[test]
    fn test_evaluate_cells_rejects_non_finite() {
        let (mesh, air, water) = two_phase(3);
        let ctx = ModelContext::new(mesh.as_ref(), &air, &water);
        let err = evaluate_cells("Test", &ctx, |_| Ok(DVec3::new(f64::INFINITY, 0.0, 0.0)))
            .unwrap_err();
        assert!(matches!(err, MpError::Evaluation { cell: 0, .. }));
    }

    #[test]
    fn test_slip_velocity() {
        let (mesh, air, water) = two_phase(2);
        let ctx = ModelContext::new(mesh.as_ref(), &air, &water);
        assert_eq!(ctx.slip_velocity(1), DVec3::new(0.0, 0.3, 0.0));
        assert_eq!(ctx.n_cells(), 2);
    }

    #[test]
    fn test_positive() {
        assert!(positive("d", 1e-3).is_ok());
        assert!(positive("d", 0.0).is_err());
        assert!(positive("d", f64::NAN).is_err());
    }
}
