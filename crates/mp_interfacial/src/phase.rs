// crates/mp_interfacial/src/phase.rs

//! 相与相系统
//!
//! [`Phase`] 持有一相的逐单元物性与运动场，[`PhaseSystem`] 按注册顺序保存所有相，
//! 并提供按名称和按 [`PhaseIndex`] 的查找。

use glam::DVec3;
use mp_foundation::{MpError, MpResult, PhaseIndex};
use std::collections::HashMap;
use std::sync::Arc;

use crate::fields::{ScalarField, VectorField};
use crate::mesh::MeshGeometry;

/// 单相的逐单元场
#[derive(Debug, Clone)]
pub struct Phase {
    name: String,
    /// 体积分数
    pub alpha: ScalarField,
    /// 速度 [m/s]
    pub velocity: VectorField,
    /// 速度物质导数 DU/Dt [m/s²]
    pub acceleration: VectorField,
    /// 密度 [kg/m³]
    pub density: ScalarField,
    /// 动力黏度 [Pa·s]
    pub viscosity: ScalarField,
    /// 颗粒/气泡直径 [m]
    pub diameter: ScalarField,
    /// 湍动能 [m²/s²]
    pub turbulent_kinetic_energy: Option<ScalarField>,
}

impl Phase {
    /// 以均匀物性创建静止相
    pub fn uniform(name: impl Into<String>, n_cells: usize, alpha: f64, density: f64) -> Self {
        Self {
            name: name.into(),
            alpha: ScalarField::uniform(n_cells, alpha),
            velocity: VectorField::zeros(n_cells),
            acceleration: VectorField::zeros(n_cells),
            density: ScalarField::uniform(n_cells, density),
            viscosity: ScalarField::uniform(n_cells, 1e-3),
            diameter: ScalarField::uniform(n_cells, 3e-3),
            turbulent_kinetic_energy: None,
        }
    }

    /// 相名称
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.alpha.len()
    }

    /// 设置体积分数场
    pub fn with_alpha(mut self, alpha: ScalarField) -> Self {
        self.alpha = alpha;
        self
    }

    /// 设置均匀速度
    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = VectorField::uniform(self.n_cells(), velocity);
        self
    }

    /// 设置速度场
    pub fn with_velocity_field(mut self, velocity: VectorField) -> Self {
        self.velocity = velocity;
        self
    }

    /// 设置速度物质导数场
    pub fn with_acceleration_field(mut self, acceleration: VectorField) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// 设置均匀黏度
    pub fn with_viscosity(mut self, viscosity: f64) -> Self {
        self.viscosity = ScalarField::uniform(self.n_cells(), viscosity);
        self
    }

    /// 设置均匀直径
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = ScalarField::uniform(self.n_cells(), diameter);
        self
    }

    /// 设置湍动能场
    pub fn with_turbulent_kinetic_energy(mut self, k: ScalarField) -> Self {
        self.turbulent_kinetic_energy = Some(k);
        self
    }

    /// 检查全部场长度
    pub fn check_sizes(&self, n_cells: usize) -> MpResult<()> {
        let check = |field: &str, len: usize| {
            MpError::check_size(&format!("{}.{}", field, self.name), n_cells, len)
        };
        check("alpha", self.alpha.len())?;
        check("U", self.velocity.len())?;
        check("DUDt", self.acceleration.len())?;
        check("rho", self.density.len())?;
        check("mu", self.viscosity.len())?;
        check("d", self.diameter.len())?;
        if let Some(k) = &self.turbulent_kinetic_energy {
            check("k", k.len())?;
        }
        Ok(())
    }
}

/// 相系统
#[derive(Debug, Clone)]
pub struct PhaseSystem {
    mesh: Arc<dyn MeshGeometry>,
    phases: Vec<Phase>,
    name_index: HashMap<String, PhaseIndex>,
}

impl PhaseSystem {
    /// 创建空相系统
    pub fn new(mesh: Arc<dyn MeshGeometry>) -> Self {
        Self {
            mesh,
            phases: Vec::new(),
            name_index: HashMap::new(),
        }
    }

    /// 注册相
    pub fn add_phase(&mut self, phase: Phase) -> MpResult<PhaseIndex> {
        if self.name_index.contains_key(phase.name()) {
            return Err(MpError::config(format!("相 '{}' 重复注册", phase.name())));
        }
        phase.check_sizes(self.mesh.n_cells())?;

        let idx = PhaseIndex::from_usize(self.phases.len());
        self.name_index.insert(phase.name().to_string(), idx);
        self.phases.push(phase);
        Ok(idx)
    }

    /// 按名称查找，未找到为配置错误
    pub fn find(&self, name: &str) -> MpResult<PhaseIndex> {
        self.index_of(name)
            .ok_or_else(|| MpError::config(format!("相 '{}' 不存在", name)))
    }

    /// 按名称查找
    pub fn index_of(&self, name: &str) -> Option<PhaseIndex> {
        self.name_index.get(name).copied()
    }

    /// 按索引获取
    pub fn get(&self, idx: PhaseIndex) -> Option<&Phase> {
        self.phases.get(idx.get())
    }

    /// 按索引获取可变引用（名称不可变）
    ///
    /// 修改后场长度不再自动检查，求值前由 [`PhaseSystem::check_sizes`] 复核。
    pub fn phase_mut(&mut self, idx: PhaseIndex) -> Option<&mut Phase> {
        self.phases.get_mut(idx.get())
    }

    /// 复核全部相的场长度与网格单元数一致
    pub fn check_sizes(&self) -> MpResult<()> {
        let n = self.mesh.n_cells();
        self.phases.iter().try_for_each(|p| p.check_sizes(n))
    }

    /// 相数量
    #[inline]
    pub fn n_phases(&self) -> usize {
        self.phases.len()
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.mesh.n_cells()
    }

    /// 网格
    pub fn mesh(&self) -> &dyn MeshGeometry {
        self.mesh.as_ref()
    }

    /// 按注册顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (PhaseIndex, &Phase)> {
        self.phases
            .iter()
            .enumerate()
            .map(|(i, p)| (PhaseIndex::from_usize(i), p))
    }
}
