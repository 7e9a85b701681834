// crates/mp_interfacial/src/models/turbulent_dispersion.rs

//! 湍流弥散力 `F = -C_td ρ_c k_c ∇α_d`
//!
//! 需要连续相提供湍动能 k_c，缺失时求值失败。

use mp_config::ForceKind;
use mp_foundation::{MpError, MpResult};

use super::{evaluate_cells, positive, ForceModel, ModelContext};
use crate::fields::VectorField;

/// 常系数湍流弥散力
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTurbulentDispersion {
    /// 弥散系数
    pub ctd: f64,
}

impl ConstantTurbulentDispersion {
    /// 创建
    pub fn new(ctd: f64) -> Self {
        Self { ctd }
    }
}

impl ForceModel for ConstantTurbulentDispersion {
    fn kind(&self) -> ForceKind {
        ForceKind::TurbulentDispersion
    }

    fn name(&self) -> &str {
        "ConstantTurbulentDispersion"
    }

    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField> {
        let c = ctx.continuous;
        let k = c.turbulent_kinetic_energy.as_ref().ok_or_else(|| {
            MpError::evaluation(
                self.name(),
                0,
                format!("连续相 '{}' 未提供湍动能", c.name()),
            )
        })?;
        let grad_alpha = ctx.mesh.gradient(&ctx.dispersed.alpha);
        evaluate_cells(self.name(), ctx, |i| {
            let rho_c = positive("rho_c", c.density[i])?;
            if !(k[i].is_finite() && k[i] >= 0.0) {
                return Err(format!("湍动能非法: {}", k[i]));
            }
            Ok(-self.ctd * rho_c * k[i] * grad_alpha[i])
        })
    }
}
