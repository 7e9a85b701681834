// crates/mp_interfacial/src/models/lift.rs

//! 升力 `F = -C_l α_d ρ_c (U_d - U_c) × (∇ × U_c)`

use mp_config::ForceKind;
use mp_foundation::MpResult;

use super::{evaluate_cells, positive, ForceModel, ModelContext};
use crate::fields::VectorField;

/// 常系数升力
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantLift {
    /// 升力系数
    pub cl: f64,
}

impl ConstantLift {
    /// 创建
    pub fn new(cl: f64) -> Self {
        Self { cl }
    }
}

impl ForceModel for ConstantLift {
    fn kind(&self) -> ForceKind {
        ForceKind::Lift
    }

    fn name(&self) -> &str {
        "ConstantLift"
    }

    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField> {
        let d = ctx.dispersed;
        let c = ctx.continuous;
        let vorticity = ctx.mesh.curl(&c.velocity);
        evaluate_cells(self.name(), ctx, |i| {
            let rho_c = positive("rho_c", c.density[i])?;
            let ur = d.velocity[i] - c.velocity[i];
            Ok(-self.cl * d.alpha[i] * rho_c * ur.cross(vorticity[i]))
        })
    }
}
