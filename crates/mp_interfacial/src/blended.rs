// crates/mp_interfacial/src/blended.rs

//! 混合界面力模型
//!
//! 一个相对的一类界面力最多由三个闭合模型组成，按流型权重逐单元组合，
//! 结果统一表示为作用于 phase1 的力：
//!
//! ```text
//! F_1 = w_seg · F_pair + w_1 · F_{1 in 2} - w_2 · F_{2 in 1}
//! ```
//!
//! 缺失的模型贡献为零；三个模型都缺失时直接返回零场，不计算权重也不调用任何模型。

use mp_config::ForceKind;
use mp_foundation::{MpError, MpResult};
use std::fmt;
use std::sync::Arc;

use crate::blending::{weights_field, BlendWeights, BlendingMethod};
use crate::fields::{map_cells, ParallelConfig, VectorField};
use crate::models::{ForceModel, ModelContext};
use crate::pair::PhasePair;
use crate::phase::{Phase, PhaseSystem};

/// 模型视角
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelView {
    /// 分层区相对级模型
    Pair,
    /// phase1 分散于 phase2
    FirstInSecond,
    /// phase2 分散于 phase1
    SecondInFirst,
}

impl ModelView {
    /// 全部视角
    pub const ALL: [ModelView; 3] = [
        ModelView::Pair,
        ModelView::FirstInSecond,
        ModelView::SecondInFirst,
    ];
}

impl fmt::Display for ModelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelView::Pair => "pair",
            ModelView::FirstInSecond => "first_in_second",
            ModelView::SecondInFirst => "second_in_first",
        };
        f.write_str(s)
    }
}

/// 按权重组合三个视角的力场
///
/// 各力场均已换算为作用于 phase1 的力，`None` 视为零。
pub fn blend_fields(
    weights: &[BlendWeights],
    pair: Option<&VectorField>,
    first_in_second: Option<&VectorField>,
    second_in_first: Option<&VectorField>,
    parallel: ParallelConfig,
) -> MpResult<VectorField> {
    let n = weights.len();
    for (name, field) in [
        ("pair", pair),
        ("first_in_second", first_in_second),
        ("second_in_first", second_in_first),
    ] {
        if let Some(f) = field {
            f.check_len(name, n)?;
        }
    }

    let values = map_cells(n, parallel, |i| {
        let w = weights[i];
        let mut f = glam::DVec3::ZERO;
        if let Some(p) = pair {
            f += w.segregated() * p[i];
        }
        if let Some(d1) = first_in_second {
            f += w.first_dispersed * d1[i];
        }
        if let Some(d2) = second_in_first {
            f -= w.second_dispersed * d2[i];
        }
        Ok(f)
    })?;
    Ok(VectorField::from(values))
}

/// 一个相对上一类界面力的混合模型
pub struct BlendedForceModel {
    kind: ForceKind,
    pair: PhasePair,
    blending: Arc<dyn BlendingMethod>,
    pair_model: Option<Box<dyn ForceModel>>,
    first_in_second: Option<Box<dyn ForceModel>>,
    second_in_first: Option<Box<dyn ForceModel>>,
}

impl fmt::Debug for BlendedForceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlendedForceModel")
            .field("kind", &self.kind)
            .field("pair", &self.pair)
            .field("blending", &self.blending.name())
            .field("pair_model", &self.pair_model.as_ref().map(|m| m.name().to_string()))
            .field("first_in_second", &self.first_in_second.as_ref().map(|m| m.name().to_string()))
            .field("second_in_first", &self.second_in_first.as_ref().map(|m| m.name().to_string()))
            .finish()
    }
}

impl BlendedForceModel {
    /// 创建空混合模型
    pub fn new(kind: ForceKind, pair: PhasePair, blending: Arc<dyn BlendingMethod>) -> Self {
        Self {
            kind,
            pair,
            blending,
            pair_model: None,
            first_in_second: None,
            second_in_first: None,
        }
    }

    /// 力类型
    #[inline]
    pub fn kind(&self) -> ForceKind {
        self.kind
    }

    /// 所属相对
    #[inline]
    pub fn pair(&self) -> &PhasePair {
        &self.pair
    }

    /// 混合方法
    pub fn blending(&self) -> &dyn BlendingMethod {
        self.blending.as_ref()
    }

    /// 设置某视角的模型
    ///
    /// 类型不符、仅分散相力配置相对级模型、同一视角重复设置均为配置错误。
    pub fn set_model(&mut self, view: ModelView, model: Box<dyn ForceModel>) -> MpResult<()> {
        if model.kind() != self.kind {
            return Err(MpError::config(format!(
                "模型 {} 的类型为 {}，不能用于 {}",
                model.name(),
                model.kind(),
                self.kind
            )));
        }
        if view == ModelView::Pair && self.kind.is_dispersed_only() {
            return Err(MpError::config(format!(
                "{} 仅作用于分散相，不能配置相对级模型",
                self.kind
            )));
        }
        let slot = match view {
            ModelView::Pair => &mut self.pair_model,
            ModelView::FirstInSecond => &mut self.first_in_second,
            ModelView::SecondInFirst => &mut self.second_in_first,
        };
        if let Some(existing) = slot {
            return Err(MpError::config(format!(
                "相对 {} 的 {} {} 模型已设置为 {}",
                self.pair,
                self.kind,
                view,
                existing.name()
            )));
        }
        *slot = Some(model);
        Ok(())
    }

    /// 某视角的模型
    pub fn model(&self, view: ModelView) -> Option<&dyn ForceModel> {
        match view {
            ModelView::Pair => self.pair_model.as_deref(),
            ModelView::FirstInSecond => self.first_in_second.as_deref(),
            ModelView::SecondInFirst => self.second_in_first.as_deref(),
        }
    }

    /// 已配置的模型数
    pub fn n_models(&self) -> usize {
        ModelView::ALL
            .iter()
            .filter(|&&v| self.model(v).is_some())
            .count()
    }

    /// 是否未配置任何模型
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_models() == 0
    }

    /// 计算作用于 phase1 的混合力场
    pub fn evaluate(&self, phases: &PhaseSystem, parallel: ParallelConfig) -> MpResult<VectorField> {
        let n = phases.n_cells();
        if self.is_empty() {
            return Ok(VectorField::zeros(n));
        }

        let phase1 = lookup(phases, &self.pair, self.pair.first())?;
        let phase2 = lookup(phases, &self.pair, self.pair.second())?;
        phase1.check_sizes(n)?;
        phase2.check_sizes(n)?;
        let weights = weights_field(self.blending.as_ref(), &phase1.alpha, &phase2.alpha, parallel)?;

        let mesh = phases.mesh();
        let view_1in2 = ModelContext::new(mesh, phase1, phase2).with_parallel(parallel);
        let view_2in1 = ModelContext::new(mesh, phase2, phase1).with_parallel(parallel);

        // 权重处处为零的视角不求值
        let active = |w: fn(&BlendWeights) -> f64| weights.iter().any(|x| w(x) > 0.0);

        let f_pair = match &self.pair_model {
            Some(m) if active(BlendWeights::segregated) => Some(m.force(&view_1in2)?),
            _ => None,
        };
        let f_1in2 = match &self.first_in_second {
            Some(m) if active(|w| w.first_dispersed) => Some(m.force(&view_1in2)?),
            _ => None,
        };
        let f_2in1 = match &self.second_in_first {
            Some(m) if active(|w| w.second_dispersed) => Some(m.force(&view_2in1)?),
            _ => None,
        };

        blend_fields(
            &weights,
            f_pair.as_ref(),
            f_1in2.as_ref(),
            f_2in1.as_ref(),
            parallel,
        )
    }
}

fn lookup<'a>(
    phases: &'a PhaseSystem,
    pair: &PhasePair,
    idx: mp_foundation::PhaseIndex,
) -> MpResult<&'a Phase> {
    phases.get(idx).ok_or_else(|| {
        MpError::config(format!(
            "相对 {} 引用了不存在的相 {}（共 {} 相）",
            pair,
            idx,
            phases.n_phases()
        ))
    })
}
