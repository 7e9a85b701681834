// crates/mp_interfacial/src/models/prescribed.rs

//! 给定力场
//!
//! 直接返回给定的均匀值或逐单元场，用于解析解验证与外部注入。

use glam::DVec3;
use mp_config::ForceKind;
use mp_foundation::MpResult;

use super::{ForceModel, ModelContext};
use crate::fields::VectorField;

/// 力场来源
#[derive(Debug, Clone, PartialEq)]
pub enum PrescribedValue {
    /// 均匀值
    Uniform(DVec3),
    /// 逐单元场
    Field(VectorField),
}

/// 给定力场模型
#[derive(Debug, Clone, PartialEq)]
pub struct PrescribedForce {
    kind: ForceKind,
    value: PrescribedValue,
}

impl PrescribedForce {
    /// 均匀力场
    pub fn uniform(kind: ForceKind, value: DVec3) -> Self {
        Self {
            kind,
            value: PrescribedValue::Uniform(value),
        }
    }

    /// 逐单元力场
    pub fn field(kind: ForceKind, field: VectorField) -> Self {
        Self {
            kind,
            value: PrescribedValue::Field(field),
        }
    }

    /// 力场来源
    pub fn value(&self) -> &PrescribedValue {
        &self.value
    }
}

impl ForceModel for PrescribedForce {
    fn kind(&self) -> ForceKind {
        self.kind
    }

    fn name(&self) -> &str {
        "Prescribed"
    }

    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField> {
        match &self.value {
            PrescribedValue::Uniform(v) => Ok(VectorField::uniform(ctx.n_cells(), *v)),
            PrescribedValue::Field(f) => {
                f.check_len("prescribed", ctx.n_cells())?;
                Ok(f.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::two_phase;

    #[test]
    fn test_uniform() {
        let (mesh, air, water) = two_phase(3);
        let ctx = ModelContext::new(mesh.as_ref(), &air, &water);
        let m = PrescribedForce::uniform(ForceKind::Lift, DVec3::Z);
        assert_eq!(m.kind(), ForceKind::Lift);
        assert_eq!(m.force(&ctx).unwrap(), VectorField::uniform(3, DVec3::Z));
    }

    #[test]
    fn test_field_length_checked() {
        let (mesh, air, water) = two_phase(3);
        let ctx = ModelContext::new(mesh.as_ref(), &air, &water);
        let m = PrescribedForce::field(ForceKind::Drag, VectorField::zeros(2));
        assert!(m.force(&ctx).is_err());
    }
}
