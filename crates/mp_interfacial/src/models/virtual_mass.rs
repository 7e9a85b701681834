// crates/mp_interfacial/src/models/virtual_mass.rs

//! 虚拟质量力 `F = C_vm α_d ρ_c (DU_c/Dt - DU_d/Dt)`

use mp_config::ForceKind;
use mp_foundation::MpResult;

use super::{evaluate_cells, positive, ForceModel, ModelContext};
use crate::fields::VectorField;

/// 常系数虚拟质量力
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantVirtualMass {
    /// 虚拟质量系数
    pub cvm: f64,
}

impl Default for ConstantVirtualMass {
    fn default() -> Self {
        Self { cvm: 0.5 }
    }
}

impl ConstantVirtualMass {
    /// 创建
    pub fn new(cvm: f64) -> Self {
        Self { cvm }
    }
}

impl ForceModel for ConstantVirtualMass {
    fn kind(&self) -> ForceKind {
        ForceKind::VirtualMass
    }

    fn name(&self) -> &str {
        "ConstantVirtualMass"
    }

    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField> {
        let d = ctx.dispersed;
        let c = ctx.continuous;
        evaluate_cells(self.name(), ctx, |i| {
            let rho_c = positive("rho_c", c.density[i])?;
            let da = c.acceleration[i] - d.acceleration[i];
            Ok(self.cvm * d.alpha[i] * rho_c * da)
        })
    }
}
