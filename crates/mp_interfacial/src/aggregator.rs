// crates/mp_interfacial/src/aggregator.rs

//! 界面力累加
//!
//! 对查询相 p 与力类型 k：
//!
//! ```text
//! F_p = Σ_{pair ∋ p} sign(p, pair) · F_pair,phase1
//! ```
//!
//! 相对按注册顺序累加；未配置模型的相对贡献为零，不计入 `n_contributing`。

use mp_config::ForceKind;
use mp_foundation::{MpError, MpResult, PhaseIndex};

use crate::fields::VectorField;
use crate::interfacial::InterfacialSystem;
use crate::pair::{PairMembership, PairSide};
use crate::phase::PhaseSystem;

/// 某相某类力的累加结果
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedForce {
    /// 力类型
    pub kind: ForceKind,
    /// 逐单元力密度 [N/m³]
    pub field: VectorField,
    /// 包含该相的相对数
    pub n_pairs: usize,
    /// 实际有模型贡献的相对数
    pub n_contributing: usize,
}

/// 界面力累加器
#[derive(Debug, Clone, Copy)]
pub struct ForceAggregator<'a> {
    phases: &'a PhaseSystem,
    interfacial: &'a InterfacialSystem,
}

impl<'a> ForceAggregator<'a> {
    /// 创建累加器，相对端点必须存在，各相场长度必须与网格一致
    pub fn new(phases: &'a PhaseSystem, interfacial: &'a InterfacialSystem) -> MpResult<Self> {
        interfacial.validate_against(phases)?;
        phases.check_sizes()?;
        Ok(Self {
            phases,
            interfacial,
        })
    }

    /// 单个相对对查询相的带符号贡献，无模型时为 `None`
    pub fn pair_contribution(
        &self,
        membership: &PairMembership,
        kind: ForceKind,
    ) -> MpResult<Option<VectorField>> {
        let Some(model) = self.interfacial.blended(membership.index, kind) else {
            return Ok(None);
        };
        let mut on_first = model.evaluate(self.phases, self.interfacial.parallel())?;
        if membership.side == PairSide::Second {
            on_first = -on_first;
        }
        Ok(Some(on_first))
    }

    /// 累加查询相上某类力
    pub fn accumulate(&self, phase: PhaseIndex, kind: ForceKind) -> MpResult<AccumulatedForce> {
        if self.phases.get(phase).is_none() {
            return Err(MpError::config(format!(
                "相 {} 不存在（共 {} 相）",
                phase,
                self.phases.n_phases()
            )));
        }

        let mut field = VectorField::zeros(self.phases.n_cells());
        let mut n_pairs = 0;
        let mut n_contributing = 0;

        for membership in self.interfacial.registry().pairs_containing(phase) {
            n_pairs += 1;
            if let Some(contribution) = self.pair_contribution(&membership, kind)? {
                field += &contribution;
                n_contributing += 1;
            }
        }

        Ok(AccumulatedForce {
            kind,
            field,
            n_pairs,
            n_contributing,
        })
    }
}
