// crates/mp_interfacial/src/models/drag.rs

//! 曳力模型
//!
//! 作用于分散相的曳力写作 `F = K (U_c - U_d)`，K 为动量交换系数 [kg/m³/s]。
//!
//! Schiller-Naumann:
//! ```text
//! Re    = ρ_c |U_r| d / μ_c            （下限 residual_re）
//! Cd·Re = 24 (1 + 0.15 Re^0.687)       Re < 1000
//!       = 0.44 Re                      Re ≥ 1000
//! K     = ¾ Cd·Re μ_c α_d / d²
//! ```

use glam::DVec3;
use mp_config::ForceKind;
use mp_foundation::MpResult;

use super::{evaluate_cells, positive, ForceModel, ModelContext};
use crate::fields::VectorField;

/// Schiller-Naumann 球形颗粒曳力
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchillerNaumannDrag {
    /// 雷诺数下限
    pub residual_re: f64,
}

impl Default for SchillerNaumannDrag {
    fn default() -> Self {
        Self { residual_re: 1e-3 }
    }
}

impl SchillerNaumannDrag {
    /// 创建
    pub fn new(residual_re: f64) -> Self {
        Self { residual_re }
    }

    /// 阻力系数与雷诺数之积
    #[inline]
    pub fn cd_re(re: f64) -> f64 {
        if re < 1000.0 {
            24.0 * (1.0 + 0.15 * re.powf(0.687))
        } else {
            0.44 * re
        }
    }
}

impl ForceModel for SchillerNaumannDrag {
    fn kind(&self) -> ForceKind {
        ForceKind::Drag
    }

    fn name(&self) -> &str {
        "SchillerNaumann"
    }

    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField> {
        let d = ctx.dispersed;
        let c = ctx.continuous;
        evaluate_cells(self.name(), ctx, |i| {
            let diameter = positive("d", d.diameter[i])?;
            let rho_c = positive("rho_c", c.density[i])?;
            let mu_c = positive("mu_c", c.viscosity[i])?;

            let ur = c.velocity[i] - d.velocity[i];
            let re = (rho_c * ur.length() * diameter / mu_c).max(self.residual_re);
            let k = 0.75 * Self::cd_re(re) * mu_c * d.alpha[i] / (diameter * diameter);
            Ok(k * ur)
        })
    }
}

/// 线性曳力 `F = k α_d α_c (U_c - U_d)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDrag {
    /// 曳力系数 [kg/m³/s]
    pub coefficient: f64,
}

impl LinearDrag {
    /// 创建
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }
}

impl ForceModel for LinearDrag {
    fn kind(&self) -> ForceKind {
        ForceKind::Drag
    }

    fn name(&self) -> &str {
        "Linear"
    }

    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField> {
        let d = ctx.dispersed;
        let c = ctx.continuous;
        evaluate_cells(self.name(), ctx, |i| {
            let ur: DVec3 = c.velocity[i] - d.velocity[i];
            Ok(self.coefficient * d.alpha[i] * c.alpha[i] * ur)
        })
    }
}
