// crates/mp_interfacial/src/phase_forces.rs

//! PhaseForces - 相界面力诊断对象
//!
//! 每个被统计的相一个实例。每步执行时对开启的力类型逐一累加全部相对的贡献，
//! 得到五个分类力场和一个合力场，再写出到 [`FieldSink`]：
//!
//! ```text
//! {prefix}:Drag.{phase}
//! {prefix}:VirtualMass.{phase}
//! {prefix}:Lift.{phase}
//! {prefix}:WallLubrication.{phase}
//! {prefix}:TurbulentDispersion.{phase}
//! {prefix}:Total.{phase}
//! ```
//!
//! 计算全部成功后才一次性提交结果；任一模型求值失败时保留上一步的场并返回错误。
//! 对象只保存解析后的相索引与自身的输出场，不持有相系统的引用。

use mp_config::{ForceKind, PhaseForcesConfig};
use mp_foundation::{MpError, MpResult, PhaseIndex};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregator::{AccumulatedForce, ForceAggregator};
use crate::fields::VectorField;
use crate::interfacial::InterfacialSystem;
use crate::phase::PhaseSystem;
use crate::sink::FieldSink;

/// 合力场名称
pub const TOTAL_FIELD: &str = "Total";

/// 相界面力诊断对象
#[derive(Debug)]
pub struct PhaseForces {
    config: PhaseForcesConfig,
    phase: PhaseIndex,
    fields: Vec<VectorField>,
    total: VectorField,
    n_executions: u64,
}

impl PhaseForces {
    /// 创建，相名称不存在时为配置错误
    pub fn new(config: PhaseForcesConfig, phases: &PhaseSystem) -> MpResult<Self> {
        let phase = resolve(&config, phases)?;
        let n = phases.n_cells();

        info!(
            phase = %config.phase_name,
            prefix = %config.field_prefix,
            kinds = ?config.forces.enabled_kinds(),
            "创建相界面力诊断对象"
        );

        Ok(Self {
            config,
            phase,
            fields: vec![VectorField::zeros(n); ForceKind::COUNT],
            total: VectorField::zeros(n),
            n_executions: 0,
        })
    }

    /// 重新读取配置
    ///
    /// 验证失败时保持原配置不变。
    pub fn read(&mut self, config: PhaseForcesConfig, phases: &PhaseSystem) -> MpResult<()> {
        let phase = resolve(&config, phases)?;
        let n = phases.n_cells();
        if self.total.len() != n {
            self.fields = vec![VectorField::zeros(n); ForceKind::COUNT];
            self.total = VectorField::zeros(n);
        }
        info!(phase = %config.phase_name, "重新读取相界面力配置");
        self.config = config;
        self.phase = phase;
        Ok(())
    }

    /// 计算全部开启的力类型并提交
    pub fn execute(&mut self, phases: &PhaseSystem, interfacial: &InterfacialSystem) -> MpResult<()> {
        self.check_phase(phases)?;
        let aggregator = ForceAggregator::new(phases, interfacial)?;
        let kinds = self.config.forces.enabled_kinds();
        let phase = self.phase;

        let results: Vec<AccumulatedForce> = if self.config.parallel_kinds {
            kinds
                .par_iter()
                .map(|&kind| aggregator.accumulate(phase, kind))
                .collect::<MpResult<_>>()?
        } else {
            kinds
                .iter()
                .map(|&kind| aggregator.accumulate(phase, kind))
                .collect::<MpResult<_>>()?
        };

        let n = phases.n_cells();
        let mut total = VectorField::zeros(n);
        for acc in &results {
            total += &acc.field;
            debug!(
                phase = %self.config.phase_name,
                kind = %acc.kind,
                n_pairs = acc.n_pairs,
                n_contributing = acc.n_contributing,
                max_magnitude = acc.field.max_magnitude(),
                "界面力累加完成"
            );
        }

        // 提交
        if self.total.len() != n {
            self.fields = vec![VectorField::zeros(n); ForceKind::COUNT];
        }
        for acc in results {
            self.fields[acc.kind.index()] = acc.field;
        }
        self.total = total;
        self.n_executions += 1;
        Ok(())
    }

    /// 写出全部开启的力场与合力场
    pub fn write(&self, sink: &mut dyn FieldSink) -> MpResult<()> {
        for kind in self.config.forces.enabled_kinds() {
            sink.write_field(&self.field_name(kind), &self.fields[kind.index()])?;
        }
        sink.write_field(&self.total_field_name(), &self.total)
    }

    /// 某类力场，未开启时为 `None`
    pub fn force(&self, kind: ForceKind) -> Option<&VectorField> {
        if self.config.forces.is_enabled(kind) {
            Some(&self.fields[kind.index()])
        } else {
            None
        }
    }

    /// 合力场
    #[inline]
    pub fn total(&self) -> &VectorField {
        &self.total
    }

    /// 某类力的输出场名
    pub fn field_name(&self, kind: ForceKind) -> String {
        self.output_name(kind.name())
    }

    /// 合力输出场名
    pub fn total_field_name(&self) -> String {
        self.output_name(TOTAL_FIELD)
    }

    /// 被统计的相名称
    #[inline]
    pub fn phase_name(&self) -> &str {
        &self.config.phase_name
    }

    /// 被统计的相索引
    #[inline]
    pub fn phase_index(&self) -> PhaseIndex {
        self.phase
    }

    /// 开启的力类型（固定顺序）
    pub fn enabled_kinds(&self) -> Vec<ForceKind> {
        self.config.forces.enabled_kinds()
    }

    /// 当前配置
    #[inline]
    pub fn config(&self) -> &PhaseForcesConfig {
        &self.config
    }

    /// 成功执行次数
    #[inline]
    pub fn n_executions(&self) -> u64 {
        self.n_executions
    }

    fn output_name(&self, field: &str) -> String {
        format!("{}:{}.{}", self.config.field_prefix, field, self.config.phase_name)
    }

    fn check_phase(&self, phases: &PhaseSystem) -> MpResult<()> {
        match phases.get(self.phase) {
            Some(p) if p.name() == self.config.phase_name => Ok(()),
            _ => Err(MpError::config(format!(
                "相系统中已不存在相 '{}'",
                self.config.phase_name
            ))),
        }
    }
}

fn resolve(config: &PhaseForcesConfig, phases: &PhaseSystem) -> MpResult<PhaseIndex> {
    config.validate()?;
    phases.find(&config.phase_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blended::ModelView;
    use crate::blending::NoBlending;
    use crate::mesh::CellMesh;
    use crate::models::{LinearDrag, PrescribedForce};
    use crate::pair::PairSide;
    use crate::phase::Phase;
    use crate::sink::FieldDatabase;
    use glam::DVec3;
    use std::sync::Arc;

    fn setup() -> (PhaseSystem, InterfacialSystem) {
        let mut sys = PhaseSystem::new(Arc::new(CellMesh::line(3, 0.01).unwrap()));
        sys.add_phase(Phase::uniform("water", 3, 0.9, 1000.0)).unwrap();
        sys.add_phase(Phase::uniform("air", 3, 0.1, 1.2).with_velocity(DVec3::Y))
            .unwrap();
        let mut b = InterfacialSystem::builder(&sys);
        let aw = b.pair("air", "water", NoBlending::with_continuous(PairSide::Second)).unwrap();
        b.model(aw, ModelView::FirstInSecond, Box::new(LinearDrag::new(10.0))).unwrap();
        b.model(
            aw,
            ModelView::FirstInSecond,
            Box::new(PrescribedForce::uniform(ForceKind::Lift, DVec3::X)),
        )
        .unwrap();
        let interfacial = b.build().unwrap();
        (sys, interfacial)
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let (sys, _) = setup();
        let err = PhaseForces::new(PhaseForcesConfig::new("oil"), &sys).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_execute_and_total() {
        let (sys, interfacial) = setup();
        let mut pf = PhaseForces::new(PhaseForcesConfig::new("water"), &sys).unwrap();
        pf.execute(&sys, &interfacial).unwrap();

        let drag = pf.force(ForceKind::Drag).unwrap();
        // 空气上受力 10·0.1·0.9·(0 - 1)ŷ，水上为其反作用
        assert!((drag[0].y - 0.9).abs() < 1e-12);
        assert_eq!(pf.force(ForceKind::Lift).unwrap()[1], -DVec3::X);
        assert!(pf.force(ForceKind::VirtualMass).unwrap().is_zero());
        assert!((pf.total()[2] - DVec3::new(-1.0, 0.9, 0.0)).length() < 1e-12);
        assert_eq!(pf.n_executions(), 1);
    }

    #[test]
    fn test_parallel_kinds_agree() {
        let (sys, interfacial) = setup();
        let mut serial = PhaseForces::new(PhaseForcesConfig::new("air"), &sys).unwrap();
        let mut parallel =
            PhaseForces::new(PhaseForcesConfig::new("air").with_parallel_kinds(true), &sys).unwrap();
        serial.execute(&sys, &interfacial).unwrap();
        parallel.execute(&sys, &interfacial).unwrap();
        assert_eq!(serial.total(), parallel.total());
        for kind in ForceKind::ALL {
            assert_eq!(serial.force(kind), parallel.force(kind));
        }
    }

    #[test]
    fn test_disabled_kind_not_written() {
        let (sys, interfacial) = setup();
        let cfg = PhaseForcesConfig::new("water").without(ForceKind::Lift);
        let mut pf = PhaseForces::new(cfg, &sys).unwrap();
        pf.execute(&sys, &interfacial).unwrap();
        assert!(pf.force(ForceKind::Lift).is_none());
        assert!(pf.total().iter().all(|v| v.x == 0.0));

        let mut db = FieldDatabase::new();
        pf.write(&mut db).unwrap();
        assert_eq!(db.len(), 5);
        assert!(db.get("interfacial:Lift.water").is_none());
        assert!(db.get("interfacial:Total.water").is_some());
        assert!(db.get("interfacial:Drag.water").is_some());
    }

    #[test]
    fn test_field_names() {
        let (sys, _) = setup();
        let pf = PhaseForces::new(PhaseForcesConfig::new("air").with_prefix("phaseForces"), &sys)
            .unwrap();
        assert_eq!(pf.field_name(ForceKind::WallLubrication), "phaseForces:WallLubrication.air");
        assert_eq!(pf.total_field_name(), "phaseForces:Total.air");
        assert_eq!(pf.phase_name(), "air");
    }

    #[test]
    fn test_read_keeps_old_config_on_failure() {
        let (sys, _) = setup();
        let mut pf = PhaseForces::new(PhaseForcesConfig::new("air"), &sys).unwrap();
        assert!(pf.read(PhaseForcesConfig::new("oil"), &sys).is_err());
        assert_eq!(pf.phase_name(), "air");

        pf.read(PhaseForcesConfig::new("water"), &sys).unwrap();
        assert_eq!(pf.phase_name(), "water");
        assert_eq!(pf.phase_index(), sys.find("water").unwrap());
    }
}
