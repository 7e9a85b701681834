// crates/mp_interfacial/src/models/wall_lubrication.rs

//! Antal 壁面润滑力
//!
//! ```text
//! U_t = U_r - (U_r · n_w) n_w
//! F   = α_d ρ_c max(0, C_w1 + C_w2 d / y_w) / d · |U_t|² n_w
//! ```
//!
//! 力沿壁面法向把分散相推离壁面；远离壁面（或无壁面）的单元为零。

use glam::DVec3;
use mp_config::ForceKind;
use mp_foundation::MpResult;

use super::{evaluate_cells, positive, ForceModel, ModelContext};
use crate::fields::VectorField;

/// Antal 壁面润滑模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntalWallLubrication {
    /// 系数 C_w1
    pub cw1: f64,
    /// 系数 C_w2
    pub cw2: f64,
}

impl Default for AntalWallLubrication {
    fn default() -> Self {
        Self { cw1: -0.01, cw2: 0.05 }
    }
}

impl AntalWallLubrication {
    /// 创建
    pub fn new(cw1: f64, cw2: f64) -> Self {
        Self { cw1, cw2 }
    }

    /// 力作用的最大壁面距离 `-C_w2 d / C_w1`（C_w1 ≥ 0 时无界）
    pub fn cutoff_distance(&self, diameter: f64) -> f64 {
        if self.cw1 < 0.0 {
            -self.cw2 * diameter / self.cw1
        } else {
            f64::INFINITY
        }
    }
}

impl ForceModel for AntalWallLubrication {
    fn kind(&self) -> ForceKind {
        ForceKind::WallLubrication
    }

    fn name(&self) -> &str {
        "Antal"
    }

    fn force(&self, ctx: &ModelContext<'_>) -> MpResult<VectorField> {
        let d = ctx.dispersed;
        let c = ctx.continuous;
        let mesh = ctx.mesh;
        evaluate_cells(self.name(), ctx, |i| {
            let y = mesh.wall_distance(i);
            if y.is_infinite() {
                return Ok(DVec3::ZERO);
            }
            let y = positive("y_wall", y)?;
            let diameter = positive("d", d.diameter[i])?;
            let rho_c = positive("rho_c", c.density[i])?;

            let n = mesh.wall_normal(i);
            let ur = ctx.slip_velocity(i);
            let ut = ur - ur.dot(n) * n;
            let coeff = (self.cw1 + self.cw2 * diameter / y).max(0.0) / diameter;
            Ok(d.alpha[i] * rho_c * coeff * ut.length_squared() * n)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::CellMesh;
    use crate::models::test_support::two_phase;
    use mp_foundation::MpError;
    use std::sync::Arc;

    #[test]
    fn test_cutoff_distance() {
        let m = AntalWallLubrication::default();
        assert!((m.cutoff_distance(3e-3) - 0.015).abs() < 1e-15);
        assert_eq!(AntalWallLubrication::new(0.0, 0.05).cutoff_distance(1e-3), f64::INFINITY);
    }

    #[test]
    fn test_force_pushes_away_from_wall() {
        // 单元中心 0.005, 0.015, ...; 截断距离 0.015
        let (mesh, air, water) = two_phase(4);
        let ctx = ModelContext::new(mesh.as_ref(), &air, &water);
        let f = AntalWallLubrication::default().force(&ctx).unwrap();

        let coeff = (-0.01 + 0.05 * 3e-3 / 0.005) / 3e-3;
        let expected = 0.1 * 1000.0 * coeff * 0.09;
        assert!((f[0].x - expected).abs() < 1e-9);
        assert!(f[0].x > 0.0);
        assert_eq!(f[0].y, 0.0);
        assert_eq!(f[2].x, 0.0);
        assert_eq!(f[3], DVec3::ZERO);
    }

    #[test]
    fn test_no_wall_gives_zero() {
        let (_, air, water) = two_phase(3);
        let mesh = CellMesh::line(3, 0.01).unwrap();
        let ctx = ModelContext::new(&mesh, &air, &water);
        assert!(AntalWallLubrication::default().force(&ctx).unwrap().is_zero());
    }

    #[test]
    fn test_zero_wall_distance_fails() {
        let (_, air, water) = two_phase(2);
        let mesh = Arc::new(
            CellMesh::line(2, 0.01)
                .unwrap()
                .with_wall(vec![0.0, 0.01], vec![DVec3::X; 2])
                .unwrap(),
        );
        let ctx = ModelContext::new(mesh.as_ref(), &air, &water);
        let err = AntalWallLubrication::default().force(&ctx).unwrap_err();
        assert!(matches!(err, MpError::Evaluation { cell: 0, .. }));
    }
}
