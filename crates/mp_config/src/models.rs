// crates/mp_config/src/models.rs

//! 闭合模型与混合方法配置
//!
//! 每个相对可为每类界面力配置最多三个模型：
//!
//! - `pair`: 分层（两相均非分散）时使用的相对级模型，仅对称力类型允许
//! - `first_in_second`: 第一相分散于第二相
//! - `second_in_first`: 第二相分散于第一相
//!
//! ```json
//! "drag": {
//!     "first_in_second": { "type": "schillerNaumann" },
//!     "second_in_first": { "type": "linear", "coefficient": 50.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::kind::ForceKind;

// ============================================================
// 单个闭合模型
// ============================================================

/// 曳力模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DragModelConfig {
    /// Schiller-Naumann 球形颗粒曳力
    SchillerNaumann {
        /// 雷诺数下限
        #[serde(default = "default_residual_re")]
        residual_re: f64,
    },
    /// 线性曳力 K = k·α_d·α_c
    Linear {
        /// 曳力系数 [kg/m³/s]
        coefficient: f64,
    },
    /// 给定力场
    Prescribed {
        /// 均匀力密度 [N/m³]
        value: [f64; 3],
    },
}

fn default_residual_re() -> f64 {
    1e-3
}

/// 虚拟质量模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VirtualMassModelConfig {
    /// 常系数虚拟质量
    ConstantCoefficient {
        /// 虚拟质量系数，球形颗粒为 0.5
        #[serde(default = "default_cvm")]
        cvm: f64,
    },
    /// 给定力场
    Prescribed {
        /// 均匀力密度 [N/m³]
        value: [f64; 3],
    },
}

fn default_cvm() -> f64 {
    0.5
}

/// 升力模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LiftModelConfig {
    /// 常系数升力
    ConstantCoefficient {
        /// 升力系数
        cl: f64,
    },
    /// 给定力场
    Prescribed {
        /// 均匀力密度 [N/m³]
        value: [f64; 3],
    },
}

/// 壁面润滑模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WallLubricationModelConfig {
    /// Antal 壁面润滑
    Antal {
        /// 系数 C_w1
        #[serde(default = "default_cw1")]
        cw1: f64,
        /// 系数 C_w2
        #[serde(default = "default_cw2")]
        cw2: f64,
    },
    /// 给定力场
    Prescribed {
        /// 均匀力密度 [N/m³]
        value: [f64; 3],
    },
}

fn default_cw1() -> f64 {
    -0.01
}

fn default_cw2() -> f64 {
    0.05
}

/// 湍流弥散模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TurbulentDispersionModelConfig {
    /// 常系数湍流弥散
    ConstantCoefficient {
        /// 弥散系数 C_td
        ctd: f64,
    },
    /// 给定力场
    Prescribed {
        /// 均匀力密度 [N/m³]
        value: [f64; 3],
    },
}

/// 闭合模型配置的公共检查
pub trait ModelConfig {
    /// 模型所属的力类型
    const KIND: ForceKind;

    /// 检查系数有效性
    fn validate(&self, key: &str) -> Result<(), ConfigError>;
}

fn check_finite(key: &str, name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!("{key}.{name}"), value, "必须为有限数"))
    }
}

fn check_vector(key: &str, value: &[f64; 3]) -> Result<(), ConfigError> {
    for (i, v) in value.iter().enumerate() {
        check_finite(key, &format!("value[{i}]"), *v)?;
    }
    Ok(())
}

impl ModelConfig for DragModelConfig {
    const KIND: ForceKind = ForceKind::Drag;

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        match self {
            Self::SchillerNaumann { residual_re } => {
                if !(residual_re.is_finite() && *residual_re > 0.0) {
                    return Err(ConfigError::invalid(
                        format!("{key}.residual_re"),
                        residual_re,
                        "必须为正",
                    ));
                }
                Ok(())
            }
            Self::Linear { coefficient } => {
                check_finite(key, "coefficient", *coefficient)?;
                if *coefficient < 0.0 {
                    return Err(ConfigError::invalid(
                        format!("{key}.coefficient"),
                        coefficient,
                        "曳力系数不能为负",
                    ));
                }
                Ok(())
            }
            Self::Prescribed { value } => check_vector(key, value),
        }
    }
}

impl ModelConfig for VirtualMassModelConfig {
    const KIND: ForceKind = ForceKind::VirtualMass;

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        match self {
            Self::ConstantCoefficient { cvm } => check_finite(key, "cvm", *cvm),
            Self::Prescribed { value } => check_vector(key, value),
        }
    }
}

impl ModelConfig for LiftModelConfig {
    const KIND: ForceKind = ForceKind::Lift;

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        match self {
            Self::ConstantCoefficient { cl } => check_finite(key, "cl", *cl),
            Self::Prescribed { value } => check_vector(key, value),
        }
    }
}

impl ModelConfig for WallLubricationModelConfig {
    const KIND: ForceKind = ForceKind::WallLubrication;

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        match self {
            Self::Antal { cw1, cw2 } => {
                check_finite(key, "cw1", *cw1)?;
                check_finite(key, "cw2", *cw2)
            }
            Self::Prescribed { value } => check_vector(key, value),
        }
    }
}

impl ModelConfig for TurbulentDispersionModelConfig {
    const KIND: ForceKind = ForceKind::TurbulentDispersion;

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        match self {
            Self::ConstantCoefficient { ctd } => check_finite(key, "ctd", *ctd),
            Self::Prescribed { value } => check_vector(key, value),
        }
    }
}

// ============================================================
// 混合模型（一个相对的一类力）
// ============================================================

/// 一个相对上某类界面力的全部模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedModelConfig<M> {
    /// 分层区相对级模型
    pub pair: Option<M>,
    /// 第一相分散于第二相
    pub first_in_second: Option<M>,
    /// 第二相分散于第一相
    pub second_in_first: Option<M>,
}

impl<M> Default for BlendedModelConfig<M> {
    fn default() -> Self {
        Self {
            pair: None,
            first_in_second: None,
            second_in_first: None,
        }
    }
}

impl<M: ModelConfig> BlendedModelConfig<M> {
    /// 是否未配置任何模型
    pub fn is_empty(&self) -> bool {
        self.pair.is_none() && self.first_in_second.is_none() && self.second_in_first.is_none()
    }

    /// 已配置的模型数
    pub fn count(&self) -> usize {
        [&self.pair, &self.first_in_second, &self.second_in_first]
            .iter()
            .filter(|m| m.is_some())
            .count()
    }

    /// 验证
    pub fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if self.pair.is_some() && M::KIND.is_dispersed_only() {
            return Err(ConfigError::invalid(
                format!("{key}.pair"),
                M::KIND,
                "仅分散相力不能配置相对级模型",
            ));
        }
        if let Some(m) = &self.pair {
            m.validate(&format!("{key}.pair"))?;
        }
        if let Some(m) = &self.first_in_second {
            m.validate(&format!("{key}.first_in_second"))?;
        }
        if let Some(m) = &self.second_in_first {
            m.validate(&format!("{key}.second_in_first"))?;
        }
        Ok(())
    }
}

// ============================================================
// 混合方法
// ============================================================

/// 流型混合方法配置
///
/// 以各相名称为键给出体积分数阈值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlendingConfig {
    /// 不混合：指定连续相后另一相始终为分散相，未指定则始终为分层区
    None {
        /// 连续相名称
        #[serde(default)]
        continuous_phase: Option<String>,
    },
    /// 分段线性过渡
    Linear {
        /// α 不超过该值时完全分散
        max_fully_dispersed_alpha: BTreeMap<String, f64>,
        /// α 超过该值时不再分散
        max_partly_dispersed_alpha: BTreeMap<String, f64>,
    },
    /// 双曲正切过渡
    Hyperbolic {
        /// 过渡中心
        max_dispersed_alpha: BTreeMap<String, f64>,
        /// 过渡宽度
        transition_alpha_scale: f64,
    },
}

impl Default for BlendingConfig {
    fn default() -> Self {
        Self::None {
            continuous_phase: None,
        }
    }
}

fn check_fraction(key: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "体积分数阈值必须位于 [0, 1]"))
    }
}

impl BlendingConfig {
    /// 验证阈值
    pub fn validate(&self, key: &str) -> Result<(), ConfigError> {
        match self {
            Self::None { .. } => Ok(()),
            Self::Linear {
                max_fully_dispersed_alpha,
                max_partly_dispersed_alpha,
            } => {
                for (phase, &full) in max_fully_dispersed_alpha {
                    check_fraction(&format!("{key}.max_fully_dispersed_alpha.{phase}"), full)?;
                    let part = max_partly_dispersed_alpha.get(phase).copied().ok_or_else(|| {
                        ConfigError::Missing(format!("{key}.max_partly_dispersed_alpha.{phase}"))
                    })?;
                    check_fraction(&format!("{key}.max_partly_dispersed_alpha.{phase}"), part)?;
                    if part <= full {
                        return Err(ConfigError::invalid(
                            format!("{key}.max_partly_dispersed_alpha.{phase}"),
                            part,
                            "必须大于 max_fully_dispersed_alpha",
                        ));
                    }
                }
                for phase in max_partly_dispersed_alpha.keys() {
                    if !max_fully_dispersed_alpha.contains_key(phase) {
                        return Err(ConfigError::Missing(format!(
                            "{key}.max_fully_dispersed_alpha.{phase}"
                        )));
                    }
                }
                Ok(())
            }
            Self::Hyperbolic {
                max_dispersed_alpha,
                transition_alpha_scale,
            } => {
                for (phase, &alpha) in max_dispersed_alpha {
                    check_fraction(&format!("{key}.max_dispersed_alpha.{phase}"), alpha)?;
                }
                if !(transition_alpha_scale.is_finite() && *transition_alpha_scale > 0.0) {
                    return Err(ConfigError::invalid(
                        format!("{key}.transition_alpha_scale"),
                        transition_alpha_scale,
                        "过渡宽度必须为正",
                    ));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_model_tags() {
        let m: DragModelConfig = serde_json::from_str(r#"{ "type": "schillerNaumann" }"#).unwrap();
        assert_eq!(m, DragModelConfig::SchillerNaumann { residual_re: 1e-3 });

        let m: DragModelConfig =
            serde_json::from_str(r#"{ "type": "linear", "coefficient": 20.0 }"#).unwrap();
        assert_eq!(m, DragModelConfig::Linear { coefficient: 20.0 });
    }

    #[test]
    fn test_blended_defaults_and_emptiness() {
        let b: BlendedModelConfig<LiftModelConfig> = serde_json::from_str("{}").unwrap();
        assert!(b.is_empty());
        assert_eq!(b.count(), 0);
        assert!(b.validate("pairs[0].lift").is_ok());
    }

    #[test]
    fn test_pair_level_law_rejected_for_dispersed_only() {
        let b = BlendedModelConfig {
            pair: Some(LiftModelConfig::ConstantCoefficient { cl: 0.25 }),
            ..Default::default()
        };
        let err = b.validate("pairs[0].lift").unwrap_err();
        assert!(err.to_string().contains("pairs[0].lift.pair"));

        let drag = BlendedModelConfig {
            pair: Some(DragModelConfig::Linear { coefficient: 1.0 }),
            ..Default::default()
        };
        assert!(drag.validate("pairs[0].drag").is_ok());
    }

    #[test]
    fn test_negative_drag_coefficient_rejected() {
        let m = DragModelConfig::Linear { coefficient: -1.0 };
        assert!(m.validate("drag").is_err());
    }

    #[test]
    fn test_linear_blending_validation() {
        let mut full = BTreeMap::new();
        let mut part = BTreeMap::new();
        full.insert("air".to_string(), 0.3);
        part.insert("air".to_string(), 0.5);
        let ok = BlendingConfig::Linear {
            max_fully_dispersed_alpha: full.clone(),
            max_partly_dispersed_alpha: part.clone(),
        };
        assert!(ok.validate("blending").is_ok());

        part.insert("air".to_string(), 0.2);
        let bad = BlendingConfig::Linear {
            max_fully_dispersed_alpha: full.clone(),
            max_partly_dispersed_alpha: part,
        };
        assert!(bad.validate("blending").is_err());

        let missing = BlendingConfig::Linear {
            max_fully_dispersed_alpha: full,
            max_partly_dispersed_alpha: BTreeMap::new(),
        };
        assert!(matches!(missing.validate("blending"), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_hyperbolic_blending_validation() {
        let mut centre = BTreeMap::new();
        centre.insert("air".to_string(), 0.3);
        let ok = BlendingConfig::Hyperbolic {
            max_dispersed_alpha: centre.clone(),
            transition_alpha_scale: 0.4,
        };
        assert!(ok.validate("blending").is_ok());

        let bad = BlendingConfig::Hyperbolic {
            max_dispersed_alpha: centre,
            transition_alpha_scale: 0.0,
        };
        assert!(bad.validate("blending").is_err());
    }

    #[test]
    fn test_blending_default_is_none() {
        let b: BlendingConfig = serde_json::from_str(r#"{ "type": "none" }"#).unwrap();
        assert_eq!(b, BlendingConfig::default());
    }
}
