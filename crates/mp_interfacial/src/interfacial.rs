// crates/mp_interfacial/src/interfacial.rs

//! 界面力系统
//!
//! 保存相对注册表以及每个 (相对, 力类型) 的混合模型，模型在构建时一次解析完毕。
//!
//! # 使用示例
//!
//! ```ignore
//! let mut builder = InterfacialSystem::builder(&phases);
//! let air_water = builder.pair("air", "water", NoBlending::with_continuous(PairSide::Second))?;
//! builder.model(air_water, ModelView::FirstInSecond, Box::new(SchillerNaumannDrag::default()))?;
//! let interfacial = builder.build()?;
//! ```

use mp_config::ForceKind;
use mp_foundation::{MpError, MpResult, PairIndex};
use std::sync::Arc;
use tracing::{info, warn};

use crate::blended::{BlendedForceModel, ModelView};
use crate::blending::BlendingMethod;
use crate::fields::ParallelConfig;
use crate::models::ForceModel;
use crate::pair::{PhasePair, PhasePairRegistry};
use crate::phase::PhaseSystem;

/// 单个相对的全部混合模型（按 [`ForceKind::ALL`] 顺序）
#[derive(Debug)]
struct PairEntry {
    blending: Arc<dyn BlendingMethod>,
    models: Vec<BlendedForceModel>,
}

impl PairEntry {
    fn new(pair: PhasePair, blending: Arc<dyn BlendingMethod>) -> Self {
        let models = ForceKind::ALL
            .iter()
            .map(|&kind| BlendedForceModel::new(kind, pair, Arc::clone(&blending)))
            .collect();
        Self { blending, models }
    }

    fn n_models(&self) -> usize {
        self.models.iter().map(BlendedForceModel::n_models).sum()
    }
}

/// 界面力系统
#[derive(Debug)]
pub struct InterfacialSystem {
    registry: PhasePairRegistry,
    entries: Vec<PairEntry>,
    parallel: ParallelConfig,
}

impl InterfacialSystem {
    /// 创建构建器
    pub fn builder(phases: &PhaseSystem) -> InterfacialSystemBuilder<'_> {
        InterfacialSystemBuilder::new(phases)
    }

    /// 相对注册表
    #[inline]
    pub fn registry(&self) -> &PhasePairRegistry {
        &self.registry
    }

    /// 相对数量
    #[inline]
    pub fn n_pairs(&self) -> usize {
        self.registry.len()
    }

    /// 逐单元并行配置
    #[inline]
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel
    }

    /// (相对, 力类型) 的混合模型，未配置任何闭合模型时为 `None`
    pub fn blended(&self, pair: PairIndex, kind: ForceKind) -> Option<&BlendedForceModel> {
        self.entries
            .get(pair.get())
            .map(|e| &e.models[kind.index()])
            .filter(|m| !m.is_empty())
    }

    /// 相对的混合方法
    pub fn blending(&self, pair: PairIndex) -> Option<&dyn BlendingMethod> {
        self.entries.get(pair.get()).map(|e| e.blending.as_ref())
    }

    /// 全部相对上某类力的闭合模型总数
    pub fn n_models(&self, kind: ForceKind) -> usize {
        self.entries
            .iter()
            .map(|e| e.models[kind.index()].n_models())
            .sum()
    }

    /// 检查相对端点均存在于相系统中
    pub fn validate_against(&self, phases: &PhaseSystem) -> MpResult<()> {
        self.registry.validate_against(phases.n_phases())
    }
}

/// 界面力系统构建器
#[derive(Debug)]
pub struct InterfacialSystemBuilder<'a> {
    phases: &'a PhaseSystem,
    registry: PhasePairRegistry,
    entries: Vec<PairEntry>,
    parallel: ParallelConfig,
}

impl<'a> InterfacialSystemBuilder<'a> {
    /// 创建构建器
    pub fn new(phases: &'a PhaseSystem) -> Self {
        Self {
            phases,
            registry: PhasePairRegistry::new(),
            entries: Vec::new(),
            parallel: ParallelConfig::default(),
        }
    }

    /// 按相名称注册相对
    pub fn pair<B>(&mut self, first: &str, second: &str, blending: B) -> MpResult<PairIndex>
    where
        B: BlendingMethod + 'static,
    {
        self.pair_with(first, second, Arc::new(blending))
    }

    /// 按相名称注册相对（共享混合方法）
    pub fn pair_with(
        &mut self,
        first: &str,
        second: &str,
        blending: Arc<dyn BlendingMethod>,
    ) -> MpResult<PairIndex> {
        let a = self.phases.find(first)?;
        let b = self.phases.find(second)?;
        let pair = PhasePair::new(a, b)?;
        let idx = self.registry.register(pair)?;
        self.entries.push(PairEntry::new(pair, blending));
        Ok(idx)
    }

    /// 为相对的某一视角设置闭合模型，力类型取自模型
    pub fn model(
        &mut self,
        pair: PairIndex,
        view: ModelView,
        model: Box<dyn ForceModel>,
    ) -> MpResult<()> {
        let n_pairs = self.entries.len();
        let entry = self
            .entries
            .get_mut(pair.get())
            .ok_or_else(|| MpError::config(format!("相对 #{} 不存在（共 {} 个）", pair, n_pairs)))?;
        let kind = model.kind();
        entry.models[kind.index()].set_model(view, model)
    }

    /// 设置逐单元并行配置
    pub fn parallel(&mut self, parallel: ParallelConfig) -> &mut Self {
        self.parallel = parallel;
        self
    }

    /// 完成构建
    pub fn build(self) -> MpResult<InterfacialSystem> {
        self.registry.validate_against(self.phases.n_phases())?;

        for ((idx, pair), entry) in self.registry.iter().zip(&self.entries) {
            if entry.n_models() == 0 {
                warn!(pair = %idx, phases = %self.label(pair), "相对未配置任何界面力模型");
            }
        }

        let system = InterfacialSystem {
            registry: self.registry,
            entries: self.entries,
            parallel: self.parallel,
        };

        info!(
            n_pairs = system.n_pairs(),
            drag = system.n_models(ForceKind::Drag),
            virtual_mass = system.n_models(ForceKind::VirtualMass),
            lift = system.n_models(ForceKind::Lift),
            wall_lubrication = system.n_models(ForceKind::WallLubrication),
            turbulent_dispersion = system.n_models(ForceKind::TurbulentDispersion),
            "界面力系统构建完成"
        );

        Ok(system)
    }

    fn label(&self, pair: &PhasePair) -> String {
        let name = |idx| self.phases.get(idx).map_or("?", |p| p.name());
        format!("({}, {})", name(pair.first()), name(pair.second()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blending::NoBlending;
    use crate::mesh::CellMesh;
    use crate::models::{ConstantLift, LinearDrag};
    use crate::pair::PairSide;
    use crate::phase::Phase;

    fn phases() -> PhaseSystem {
        let mut sys = PhaseSystem::new(Arc::new(CellMesh::line(3, 0.01).unwrap()));
        sys.add_phase(Phase::uniform("water", 3, 0.8, 1000.0)).unwrap();
        sys.add_phase(Phase::uniform("air", 3, 0.15, 1.2)).unwrap();
        sys.add_phase(Phase::uniform("sand", 3, 0.05, 2650.0)).unwrap();
        sys
    }

    #[test]
    fn test_build_and_lookup() {
        let sys = phases();
        let mut b = InterfacialSystem::builder(&sys);
        let aw = b.pair("air", "water", NoBlending::with_continuous(PairSide::Second)).unwrap();
        let sw = b.pair("sand", "water", NoBlending::with_continuous(PairSide::Second)).unwrap();
        b.model(aw, ModelView::FirstInSecond, Box::new(LinearDrag::new(10.0))).unwrap();
        b.model(aw, ModelView::FirstInSecond, Box::new(ConstantLift::new(0.2))).unwrap();
        let system = b.build().unwrap();

        assert_eq!(system.n_pairs(), 2);
        assert!(system.blended(aw, ForceKind::Drag).is_some());
        assert!(system.blended(aw, ForceKind::Lift).is_some());
        assert!(system.blended(aw, ForceKind::VirtualMass).is_none());
        assert!(system.blended(sw, ForceKind::Drag).is_none());
        assert_eq!(system.n_models(ForceKind::Drag), 1);
        assert_eq!(system.blending(sw).unwrap().name(), "none");
        assert!(system.validate_against(&sys).is_ok());
    }

    #[test]
    fn test_unknown_phase_is_config_error() {
        let sys = phases();
        let mut b = InterfacialSystem::builder(&sys);
        let err = b.pair("air", "oil", NoBlending::default()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let sys = phases();
        let mut b = InterfacialSystem::builder(&sys);
        b.pair("air", "water", NoBlending::default()).unwrap();
        assert!(b.pair("water", "air", NoBlending::default()).unwrap_err().is_config());
    }

    #[test]
    fn test_unknown_pair_index_rejected() {
        let sys = phases();
        let mut b = InterfacialSystem::builder(&sys);
        let err = b
            .model(PairIndex::new(4), ModelView::Pair, Box::new(LinearDrag::new(1.0)))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_dispersed_only_pair_law_rejected() {
        let sys = phases();
        let mut b = InterfacialSystem::builder(&sys);
        let aw = b.pair("air", "water", NoBlending::default()).unwrap();
        assert!(b
            .model(aw, ModelView::Pair, Box::new(ConstantLift::new(0.1)))
            .unwrap_err()
            .is_config());
    }
}
