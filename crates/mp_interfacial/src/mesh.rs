// crates/mp_interfacial/src/mesh.rs

//! 网格几何接口
//!
//! 界面力模型只需要网格提供少量几何量与算子：
//! - 单元数与单元体积
//! - 到最近壁面的距离及壁面法向（壁面润滑力）
//! - 标量场梯度（湍流弥散力）与速度旋度（升力）
//!
//! [`CellMesh`] 是一个基于面列表的有限体积实现，梯度采用 Green-Gauss 公式：
//!
//! ```text
//! ∇φ_c ≈ (1/V_c) Σ_f φ_f · S_f
//! ```
//!
//! 边界面取所属单元值（零梯度）。

use glam::DVec3;
use mp_foundation::{MpError, MpResult};
use rayon::prelude::*;
use std::fmt;

use crate::fields::{ParallelConfig, ScalarField, VectorField};

/// 网格几何接口
///
/// 实现方保证在一次聚合调用期间几何量不变。
pub trait MeshGeometry: Send + Sync + fmt::Debug {
    /// 单元数量
    fn n_cells(&self) -> usize;

    /// 单元体积 [m³]
    fn cell_volume(&self, cell: usize) -> f64;

    /// 到最近壁面的距离 [m]，无壁面时为 `f64::INFINITY`
    fn wall_distance(&self, cell: usize) -> f64;

    /// 最近壁面的单位法向（由壁面指向流体），无壁面时为零向量
    fn wall_normal(&self, cell: usize) -> DVec3;

    /// 标量场梯度
    fn gradient(&self, field: &ScalarField) -> VectorField;

    /// 向量场旋度
    fn curl(&self, field: &VectorField) -> VectorField {
        let gu = self.gradient(&field.component(0));
        let gv = self.gradient(&field.component(1));
        let gw = self.gradient(&field.component(2));
        VectorField::from_fn(field.len(), |i| {
            DVec3::new(gw[i].y - gv[i].z, gu[i].z - gw[i].x, gv[i].x - gu[i].y)
        })
    }
}

/// 网格面
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshFace {
    /// 所属单元
    pub owner: usize,
    /// 相邻单元，边界面为 `None`
    pub neighbour: Option<usize>,
    /// 面积向量（由 owner 指向外侧）[m²]
    pub area_vector: DVec3,
    /// 面心
    pub centroid: DVec3,
}

/// 基于面列表的有限体积网格
#[derive(Debug, Clone)]
pub struct CellMesh {
    volumes: Vec<f64>,
    centroids: Vec<DVec3>,
    faces: Vec<MeshFace>,
    cell_faces: Vec<Vec<usize>>,
    wall_distance: Vec<f64>,
    wall_normal: Vec<DVec3>,
    parallel: ParallelConfig,
}

impl CellMesh {
    /// 由单元体积、单元中心和面列表创建
    pub fn new(volumes: Vec<f64>, centroids: Vec<DVec3>, faces: Vec<MeshFace>) -> MpResult<Self> {
        let n = volumes.len();
        MpError::check_size("centroids", n, centroids.len())?;

        if let Some(cell) = volumes.iter().position(|&v| !(v.is_finite() && v > 0.0)) {
            return Err(MpError::invalid_input(format!("单元 {} 体积非正", cell)));
        }

        let mut cell_faces = vec![Vec::new(); n];
        for (f, face) in faces.iter().enumerate() {
            MpError::check_index("Cell", face.owner, n)?;
            cell_faces[face.owner].push(f);
            if let Some(nb) = face.neighbour {
                MpError::check_index("Cell", nb, n)?;
                if nb == face.owner {
                    return Err(MpError::invalid_input(format!("面 {} 的两侧为同一单元", f)));
                }
                cell_faces[nb].push(f);
            }
        }

        Ok(Self {
            volumes,
            centroids,
            faces,
            cell_faces,
            wall_distance: vec![f64::INFINITY; n],
            wall_normal: vec![DVec3::ZERO; n],
            parallel: ParallelConfig::default(),
        })
    }

    /// 沿 x 方向的立方体单元链
    ///
    /// 单元 i 的中心位于 `((i + 0.5)·dx, 0, 0)`，横截面积为 dx²。
    pub fn line(n_cells: usize, spacing: f64) -> MpResult<Self> {
        if n_cells == 0 {
            return Err(MpError::invalid_input("单元数必须大于零"));
        }
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(MpError::invalid_input(format!("单元间距必须为正: {}", spacing)));
        }

        let area = spacing * spacing;
        let volumes = vec![area * spacing; n_cells];
        let centroids: Vec<DVec3> = (0..n_cells)
            .map(|i| DVec3::new((i as f64 + 0.5) * spacing, 0.0, 0.0))
            .collect();

        let mut faces = Vec::with_capacity(n_cells + 1);
        faces.push(MeshFace {
            owner: 0,
            neighbour: None,
            area_vector: DVec3::new(-area, 0.0, 0.0),
            centroid: DVec3::ZERO,
        });
        for i in 0..n_cells - 1 {
            faces.push(MeshFace {
                owner: i,
                neighbour: Some(i + 1),
                area_vector: DVec3::new(area, 0.0, 0.0),
                centroid: DVec3::new((i + 1) as f64 * spacing, 0.0, 0.0),
            });
        }
        faces.push(MeshFace {
            owner: n_cells - 1,
            neighbour: None,
            area_vector: DVec3::new(area, 0.0, 0.0),
            centroid: DVec3::new(n_cells as f64 * spacing, 0.0, 0.0),
        });

        Self::new(volumes, centroids, faces)
    }

    /// 设置逐单元壁面距离与法向
    pub fn with_wall(mut self, distance: Vec<f64>, normal: Vec<DVec3>) -> MpResult<Self> {
        let n = self.n_cells();
        MpError::check_size("wall_distance", n, distance.len())?;
        MpError::check_size("wall_normal", n, normal.len())?;
        self.wall_distance = distance;
        self.wall_normal = normal.into_iter().map(|v| v.normalize_or_zero()).collect();
        Ok(self)
    }

    /// 将 x = 0 平面设为壁面（法向 +x）
    pub fn with_wall_at_origin(mut self) -> Self {
        self.wall_distance = self.centroids.iter().map(|c| c.x).collect();
        self.wall_normal = vec![DVec3::X; self.centroids.len()];
        self
    }

    /// 设置梯度计算的并行配置
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// 单元中心
    pub fn centroid(&self, cell: usize) -> DVec3 {
        self.centroids[cell]
    }

    /// 面数量
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// 面心处的距离加权插值
    fn face_value(&self, face: &MeshFace, field: &[f64]) -> f64 {
        let phi_o = field[face.owner];
        match face.neighbour {
            None => phi_o,
            Some(nb) => {
                let phi_n = field[nb];
                let d_o = (face.centroid - self.centroids[face.owner]).length();
                let d_n = (face.centroid - self.centroids[nb]).length();
                let d_total = d_o + d_n;
                if d_total < 1e-14 {
                    0.5 * (phi_o + phi_n)
                } else {
                    (phi_o * d_n + phi_n * d_o) / d_total
                }
            }
        }
    }

    fn cell_gradient(&self, cell: usize, field: &[f64]) -> DVec3 {
        let mut sum = DVec3::ZERO;
        for &f in &self.cell_faces[cell] {
            let face = &self.faces[f];
            let phi_f = self.face_value(face, field);
            if face.owner == cell {
                sum += phi_f * face.area_vector;
            } else {
                sum -= phi_f * face.area_vector;
            }
        }
        sum / self.volumes[cell]
    }
}

impl MeshGeometry for CellMesh {
    fn n_cells(&self) -> usize {
        self.volumes.len()
    }

    fn cell_volume(&self, cell: usize) -> f64 {
        self.volumes[cell]
    }

    fn wall_distance(&self, cell: usize) -> f64 {
        self.wall_distance[cell]
    }

    fn wall_normal(&self, cell: usize) -> DVec3 {
        self.wall_normal[cell]
    }

    fn gradient(&self, field: &ScalarField) -> VectorField {
        assert_eq!(field.len(), self.n_cells(), "标量场长度与网格不一致");
        let values = field.as_slice();
        let n = self.n_cells();
        if self.parallel.should_parallelize(n) {
            let grads: Vec<DVec3> = (0..n)
                .into_par_iter()
                .map(|cell| self.cell_gradient(cell, values))
                .collect();
            VectorField::from(grads)
        } else {
            VectorField::from_fn(n, |cell| self.cell_gradient(cell, values))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_line_mesh_layout() {
        let mesh = CellMesh::line(4, 0.5).unwrap();
        assert_eq!(mesh.n_cells(), 4);
        assert_eq!(mesh.n_faces(), 5);
        assert!(approx_eq(mesh.cell_volume(0), 0.125));
        assert!(approx_eq(mesh.centroid(3).x, 1.75));
        assert_eq!(mesh.wall_distance(0), f64::INFINITY);
        assert_eq!(mesh.wall_normal(0), DVec3::ZERO);
    }

    #[test]
    fn test_line_mesh_rejects_bad_input() {
        assert!(CellMesh::line(0, 1.0).is_err());
        assert!(CellMesh::line(3, -1.0).is_err());
    }

    #[test]
    fn test_uniform_field_has_zero_gradient() {
        let mesh = CellMesh::line(6, 0.1).unwrap();
        let grad = mesh.gradient(&ScalarField::uniform(6, 0.7));
        for g in grad.iter() {
            assert!(g.length() < 1e-12);
        }
    }

    #[test]
    fn test_linear_field_gradient_interior() {
        let dx = 0.1;
        let mesh = CellMesh::line(8, dx).unwrap();
        let field = ScalarField::from_fn(8, |i| 2.0 * (i as f64 + 0.5) * dx + 1.0);
        let grad = mesh.gradient(&field);
        for i in 1..7 {
            assert!(approx_eq(grad[i].x, 2.0), "cell {} grad {}", i, grad[i].x);
            assert!(approx_eq(grad[i].y, 0.0));
        }
    }

    #[test]
    fn test_gradient_serial_parallel_agree() {
        let serial = CellMesh::line(50, 0.02).unwrap().with_parallel(ParallelConfig::serial());
        let parallel = CellMesh::line(50, 0.02).unwrap().with_parallel(ParallelConfig::always());
        let field = ScalarField::from_fn(50, |i| (i as f64 * 0.3).sin());
        assert_eq!(serial.gradient(&field), parallel.gradient(&field));
    }

    #[test]
    fn test_curl_of_shear_flow() {
        // u = (0, 3x, 0) => ω = (0, 0, 3)
        let dx = 0.1;
        let mesh = CellMesh::line(10, dx).unwrap();
        let velocity = VectorField::from_fn(10, |i| DVec3::new(0.0, 3.0 * (i as f64 + 0.5) * dx, 0.0));
        let curl = mesh.curl(&velocity);
        for i in 1..9 {
            assert!(approx_eq(curl[i].z, 3.0));
            assert!(approx_eq(curl[i].x, 0.0));
        }
    }

    #[test]
    fn test_wall_at_origin() {
        let mesh = CellMesh::line(3, 1.0).unwrap().with_wall_at_origin();
        assert!(approx_eq(mesh.wall_distance(0), 0.5));
        assert!(approx_eq(mesh.wall_distance(2), 2.5));
        assert_eq!(mesh.wall_normal(1), DVec3::X);
    }

    #[test]
    fn test_with_wall_size_checked() {
        let mesh = CellMesh::line(3, 1.0).unwrap();
        assert!(mesh.clone().with_wall(vec![1.0; 2], vec![DVec3::X; 3]).is_err());
        let mesh = mesh
            .with_wall(vec![1.0; 3], vec![DVec3::new(0.0, 2.0, 0.0); 3])
            .unwrap();
        assert_eq!(mesh.wall_normal(0), DVec3::Y);
    }
}
