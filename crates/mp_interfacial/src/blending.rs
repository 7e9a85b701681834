// crates/mp_interfacial/src/blending.rs

//! 流型混合权重
//!
//! 每个单元上，一个相对处于三种流型的组合：
//!
//! - phase1 分散于 phase2，权重 `w1`
//! - phase2 分散于 phase1，权重 `w2`
//! - 分层（两相均非分散），权重 `w_seg = 1 - w1 - w2`
//!
//! [`BlendingMethod`] 由两相体积分数给出 `(w1, w2)`，
//! 所有内置方法对 α 连续，输出总在单纯形上。

use mp_foundation::{MpError, MpResult};
use std::fmt;
use std::sync::Arc;

use crate::fields::{map_cells, ParallelConfig, ScalarField};
use crate::pair::PairSide;

/// 单元流型权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    /// phase1 分散于 phase2 的权重
    pub first_dispersed: f64,
    /// phase2 分散于 phase1 的权重
    pub second_dispersed: f64,
}

impl BlendWeights {
    /// 完全分层
    pub const SEGREGATED: BlendWeights = BlendWeights {
        first_dispersed: 0.0,
        second_dispersed: 0.0,
    };

    /// phase1 完全分散
    pub const FIRST_DISPERSED: BlendWeights = BlendWeights {
        first_dispersed: 1.0,
        second_dispersed: 0.0,
    };

    /// phase2 完全分散
    pub const SECOND_DISPERSED: BlendWeights = BlendWeights {
        first_dispersed: 0.0,
        second_dispersed: 1.0,
    };

    /// 创建权重，投影到单纯形上
    ///
    /// 各分量截断到 [0, 1]，非有限值视为 0；和超过 1 时按比例缩放。
    pub fn new(first_dispersed: f64, second_dispersed: f64) -> Self {
        let clamp = |w: f64| if w.is_finite() { w.clamp(0.0, 1.0) } else { 0.0 };
        let mut w1 = clamp(first_dispersed);
        let mut w2 = clamp(second_dispersed);
        let sum = w1 + w2;
        if sum > 1.0 {
            w1 /= sum;
            w2 /= sum;
        }
        Self {
            first_dispersed: w1,
            second_dispersed: w2,
        }
    }

    /// 某侧分散的权重
    #[inline]
    pub fn dispersed(&self, side: PairSide) -> f64 {
        match side {
            PairSide::First => self.first_dispersed,
            PairSide::Second => self.second_dispersed,
        }
    }

    /// 分层权重
    #[inline]
    pub fn segregated(&self) -> f64 {
        (1.0 - self.first_dispersed - self.second_dispersed).max(0.0)
    }
}

/// 流型混合方法
pub trait BlendingMethod: Send + Sync + fmt::Debug {
    /// 方法名称
    fn name(&self) -> &str;

    /// 由两相体积分数计算权重
    fn weights(&self, alpha1: f64, alpha2: f64) -> BlendWeights;
}

/// 逐单元计算权重
pub fn weights_field(
    method: &dyn BlendingMethod,
    alpha1: &ScalarField,
    alpha2: &ScalarField,
    parallel: ParallelConfig,
) -> MpResult<Vec<BlendWeights>> {
    MpError::check_size("alpha2", alpha1.len(), alpha2.len())?;
    map_cells(alpha1.len(), parallel, |i| Ok(method.weights(alpha1[i], alpha2[i])))
}

// ============================================================
// 不混合
// ============================================================

/// 固定流型
///
/// 给定连续相时另一相始终完全分散；未给定时始终为分层。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoBlending {
    /// 连续相所在侧
    pub continuous: Option<PairSide>,
}

impl NoBlending {
    /// 始终分层
    pub fn segregated() -> Self {
        Self { continuous: None }
    }

    /// 指定连续相
    pub fn with_continuous(side: PairSide) -> Self {
        Self {
            continuous: Some(side),
        }
    }
}

impl BlendingMethod for NoBlending {
    fn name(&self) -> &str {
        "none"
    }

    fn weights(&self, _alpha1: f64, _alpha2: f64) -> BlendWeights {
        match self.continuous {
            None => BlendWeights::SEGREGATED,
            Some(PairSide::First) => BlendWeights::SECOND_DISPERSED,
            Some(PairSide::Second) => BlendWeights::FIRST_DISPERSED,
        }
    }
}

// ============================================================
// 线性混合
// ============================================================

/// 分段线性斜坡
///
/// ```text
/// w(α) = 1                              α ≤ full
///      = (partly - α) / (partly - full) full < α < partly
///      = 0                              α ≥ partly
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRamp {
    /// 完全分散上限
    pub max_fully_dispersed: f64,
    /// 部分分散上限
    pub max_partly_dispersed: f64,
}

impl LinearRamp {
    /// 创建斜坡
    pub fn new(max_fully_dispersed: f64, max_partly_dispersed: f64) -> MpResult<Self> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !(in_unit(max_fully_dispersed) && in_unit(max_partly_dispersed)) {
            return Err(MpError::invalid_config(
                "max_dispersed_alpha",
                format!("[{}, {}]", max_fully_dispersed, max_partly_dispersed),
                "阈值必须位于 [0, 1]",
            ));
        }
        if max_partly_dispersed <= max_fully_dispersed {
            return Err(MpError::invalid_config(
                "max_partly_dispersed_alpha",
                max_partly_dispersed.to_string(),
                "必须大于 max_fully_dispersed_alpha",
            ));
        }
        Ok(Self {
            max_fully_dispersed,
            max_partly_dispersed,
        })
    }

    /// 分散权重
    #[inline]
    pub fn weight(&self, alpha: f64) -> f64 {
        let w = (self.max_partly_dispersed - alpha)
            / (self.max_partly_dispersed - self.max_fully_dispersed);
        w.clamp(0.0, 1.0)
    }
}

/// 线性混合，未给出斜坡的一侧永不分散
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearBlending {
    /// phase1 的斜坡
    pub first: Option<LinearRamp>,
    /// phase2 的斜坡
    pub second: Option<LinearRamp>,
}

impl LinearBlending {
    /// 创建
    pub fn new(first: Option<LinearRamp>, second: Option<LinearRamp>) -> Self {
        Self { first, second }
    }
}

impl BlendingMethod for LinearBlending {
    fn name(&self) -> &str {
        "linear"
    }

    fn weights(&self, alpha1: f64, alpha2: f64) -> BlendWeights {
        let w1 = self.first.map_or(0.0, |r| r.weight(alpha1));
        let w2 = self.second.map_or(0.0, |r| r.weight(alpha2));
        BlendWeights::new(w1, w2)
    }
}

// ============================================================
// 双曲正切混合
// ============================================================

/// 双曲正切混合
///
/// `w(α) = ½ (1 - tanh(4 (α - centre) / scale))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperbolicBlending {
    /// phase1 的过渡中心
    pub first_centre: Option<f64>,
    /// phase2 的过渡中心
    pub second_centre: Option<f64>,
    /// 过渡宽度
    pub transition_scale: f64,
}

impl HyperbolicBlending {
    /// 创建
    pub fn new(
        first_centre: Option<f64>,
        second_centre: Option<f64>,
        transition_scale: f64,
    ) -> MpResult<Self> {
        if !(transition_scale.is_finite() && transition_scale > 0.0) {
            return Err(MpError::invalid_config(
                "transition_alpha_scale",
                transition_scale.to_string(),
                "过渡宽度必须为正",
            ));
        }
        Ok(Self {
            first_centre,
            second_centre,
            transition_scale,
        })
    }

    #[inline]
    fn ramp(&self, centre: f64, alpha: f64) -> f64 {
        0.5 * (1.0 - (4.0 * (alpha - centre) / self.transition_scale).tanh())
    }
}

impl BlendingMethod for HyperbolicBlending {
    fn name(&self) -> &str {
        "hyperbolic"
    }

    fn weights(&self, alpha1: f64, alpha2: f64) -> BlendWeights {
        let w1 = self.first_centre.map_or(0.0, |c| self.ramp(c, alpha1));
        let w2 = self.second_centre.map_or(0.0, |c| self.ramp(c, alpha2));
        BlendWeights::new(w1, w2)
    }
}

// ============================================================
// 闭包
// ============================================================

type WeightFn = dyn Fn(f64, f64) -> BlendWeights + Send + Sync;

/// 由闭包给出权重
#[derive(Clone)]
pub struct FnBlending {
    name: String,
    f: Arc<WeightFn>,
}

impl FnBlending {
    /// 创建
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(f64, f64) -> BlendWeights + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }
}

impl fmt::Debug for FnBlending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBlending").field("name", &self.name).finish()
    }
}

impl BlendingMethod for FnBlending {
    fn name(&self) -> &str {
        &self.name
    }

    fn weights(&self, alpha1: f64, alpha2: f64) -> BlendWeights {
        let w = (self.f)(alpha1, alpha2);
        BlendWeights::new(w.first_dispersed, w.second_dispersed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_weights_projected_onto_simplex() {
        let w = BlendWeights::new(0.8, 0.6);
        assert!(approx_eq(w.first_dispersed + w.second_dispersed, 1.0));
        assert!(approx_eq(w.first_dispersed / w.second_dispersed, 0.8 / 0.6));
        assert!(approx_eq(w.segregated(), 0.0));

        let w = BlendWeights::new(-0.5, f64::NAN);
        assert_eq!(w, BlendWeights::SEGREGATED);
        assert_eq!(w.segregated(), 1.0);

        let w = BlendWeights::new(0.25, 0.25);
        assert!(approx_eq(w.segregated(), 0.5));
        assert_eq!(w.dispersed(PairSide::Second), 0.25);
    }

    #[test]
    fn test_no_blending() {
        assert_eq!(NoBlending::segregated().weights(0.3, 0.7), BlendWeights::SEGREGATED);
        assert_eq!(
            NoBlending::with_continuous(PairSide::Second).weights(0.3, 0.7),
            BlendWeights::FIRST_DISPERSED
        );
        assert_eq!(
            NoBlending::with_continuous(PairSide::First).weights(0.3, 0.7),
            BlendWeights::SECOND_DISPERSED
        );
    }

    #[test]
    fn test_linear_ramp() {
        let ramp = LinearRamp::new(0.3, 0.5).unwrap();
        assert_eq!(ramp.weight(0.1), 1.0);
        assert_eq!(ramp.weight(0.3), 1.0);
        assert!(approx_eq(ramp.weight(0.4), 0.5));
        assert_eq!(ramp.weight(0.5), 0.0);
        assert_eq!(ramp.weight(0.9), 0.0);

        assert!(LinearRamp::new(0.5, 0.3).is_err());
        assert!(LinearRamp::new(0.3, 1.5).is_err());
    }

    #[test]
    fn test_linear_blending_continuity() {
        let blend = LinearBlending::new(Some(LinearRamp::new(0.3, 0.5).unwrap()), None);
        let mut prev = blend.weights(0.0, 1.0).first_dispersed;
        let mut a = 0.0;
        while a <= 1.0 {
            let w = blend.weights(a, 1.0 - a);
            assert!(w.second_dispersed == 0.0);
            assert!((w.first_dispersed - prev).abs() <= 0.01 / 0.2 + 1e-12);
            prev = w.first_dispersed;
            a += 0.01;
        }
    }

    #[test]
    fn test_linear_blending_both_sides_rescaled() {
        let ramp = LinearRamp::new(0.3, 0.7).unwrap();
        let blend = LinearBlending::new(Some(ramp), Some(ramp));
        let w = blend.weights(0.2, 0.2);
        assert!(approx_eq(w.first_dispersed, 0.5));
        assert!(approx_eq(w.second_dispersed, 0.5));
    }

    #[test]
    fn test_hyperbolic_blending() {
        let blend = HyperbolicBlending::new(Some(0.3), None, 0.1).unwrap();
        assert!(approx_eq(blend.weights(0.3, 0.7).first_dispersed, 0.5));
        assert!(blend.weights(0.0, 1.0).first_dispersed > 0.999);
        assert!(blend.weights(1.0, 0.0).first_dispersed < 1e-3);
        assert_eq!(blend.weights(0.3, 0.7).second_dispersed, 0.0);

        assert!(HyperbolicBlending::new(None, None, 0.0).is_err());
    }

    #[test]
    fn test_fn_blending_is_projected() {
        let blend = FnBlending::new("all", |_, _| BlendWeights {
            first_dispersed: 2.0,
            second_dispersed: 2.0,
        });
        let w = blend.weights(0.5, 0.5);
        assert!(approx_eq(w.first_dispersed, 0.5));
        assert_eq!(blend.name(), "all");
    }

    #[test]
    fn test_weights_field() {
        let blend = LinearBlending::new(Some(LinearRamp::new(0.3, 0.5).unwrap()), None);
        let a1 = ScalarField::from(vec![0.1, 0.4, 0.9]);
        let a2 = ScalarField::from(vec![0.9, 0.6, 0.1]);
        let w = weights_field(&blend, &a1, &a2, ParallelConfig::serial()).unwrap();
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].first_dispersed, 1.0);
        assert!(approx_eq(w[1].first_dispersed, 0.5));
        assert_eq!(w[2].first_dispersed, 0.0);

        let short = ScalarField::zeros(2);
        assert!(weights_field(&blend, &a1, &short, ParallelConfig::serial()).is_err());
    }
}
