// crates/mp_config/src/case.rs

//! CaseConfig - 算例配置
//!
//! 描述一维单元链网格、各相初始场、相对及其闭合模型、需要统计的相。
//! 相名称与相对端点的存在性检查由物理层在构建时完成，这里只检查数值范围。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::{
    BlendedModelConfig, BlendingConfig, DragModelConfig, LiftModelConfig,
    TurbulentDispersionModelConfig, VirtualMassModelConfig, WallLubricationModelConfig,
};
use crate::phase_forces::PhaseForcesConfig;

/// 算例配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 网格配置
    pub mesh: MeshConfig,

    /// 各相配置（注册顺序即求和顺序）
    pub phases: Vec<PhaseConfig>,

    /// 相对配置
    #[serde(default)]
    pub pairs: Vec<PairConfig>,

    /// 需要统计界面力的相
    #[serde(default)]
    pub phase_forces: Vec<PhaseForcesConfig>,

    /// 运行控制
    #[serde(default)]
    pub run: RunConfig,
}

/// 网格配置：沿 x 方向排列的等距单元链
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// 单元数
    pub n_cells: usize,

    /// 单元间距 [m]
    #[serde(default = "default_spacing")]
    pub spacing: f64,

    /// x = 0 处是否为壁面
    #[serde(default)]
    pub wall_at_origin: bool,
}

fn default_spacing() -> f64 {
    0.01
}

/// 标量场初值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarInit {
    /// 均匀值
    Uniform(f64),
    /// 沿单元链线性分布
    Linear {
        /// 首单元值
        start: f64,
        /// 末单元值
        end: f64,
    },
}

impl ScalarInit {
    /// 第 `cell` 个单元（共 `n` 个）的值
    pub fn value_at(&self, cell: usize, n: usize) -> f64 {
        match *self {
            ScalarInit::Uniform(v) => v,
            ScalarInit::Linear { start, end } => {
                if n <= 1 {
                    start
                } else {
                    start + (end - start) * cell as f64 / (n - 1) as f64
                }
            }
        }
    }

    fn bounds(&self) -> (f64, f64) {
        match *self {
            ScalarInit::Uniform(v) => (v, v),
            ScalarInit::Linear { start, end } => (start.min(end), start.max(end)),
        }
    }
}

/// 向量场初值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VectorInit {
    /// 均匀值
    Uniform([f64; 3]),
    /// 沿单元链线性分布
    Linear {
        /// 首单元值
        start: [f64; 3],
        /// 末单元值
        end: [f64; 3],
    },
}

impl Default for VectorInit {
    fn default() -> Self {
        VectorInit::Uniform([0.0; 3])
    }
}

impl VectorInit {
    /// 第 `cell` 个单元（共 `n` 个）的值
    pub fn value_at(&self, cell: usize, n: usize) -> [f64; 3] {
        match *self {
            VectorInit::Uniform(v) => v,
            VectorInit::Linear { start, end } => {
                let t = if n <= 1 { 0.0 } else { cell as f64 / (n - 1) as f64 };
                [
                    start[0] + (end[0] - start[0]) * t,
                    start[1] + (end[1] - start[1]) * t,
                    start[2] + (end[2] - start[2]) * t,
                ]
            }
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            VectorInit::Uniform(v) => v.iter().all(|x| x.is_finite()),
            VectorInit::Linear { start, end } => {
                start.iter().chain(end.iter()).all(|x| x.is_finite())
            }
        }
    }
}

/// 相配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// 相名称
    pub name: String,
    /// 体积分数
    pub alpha: ScalarInit,
    /// 速度 [m/s]
    #[serde(default)]
    pub velocity: VectorInit,
    /// 速度物质导数 DU/Dt [m/s²]
    #[serde(default)]
    pub acceleration: VectorInit,
    /// 密度 [kg/m³]
    pub density: f64,
    /// 动力黏度 [Pa·s]
    #[serde(default = "default_viscosity")]
    pub viscosity: f64,
    /// 颗粒/气泡直径 [m]
    #[serde(default = "default_diameter")]
    pub diameter: f64,
    /// 湍动能 [m²/s²]
    #[serde(default)]
    pub turbulent_kinetic_energy: Option<f64>,
}

fn default_viscosity() -> f64 {
    1e-3
}

fn default_diameter() -> f64 {
    3e-3
}

/// 相对配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairConfig {
    /// 两相名称（顺序决定"第一相"与"第二相"）
    pub phases: [String; 2],

    /// 流型混合方法
    #[serde(default)]
    pub blending: BlendingConfig,

    /// 曳力
    #[serde(default)]
    pub drag: BlendedModelConfig<DragModelConfig>,

    /// 虚拟质量力
    #[serde(default)]
    pub virtual_mass: BlendedModelConfig<VirtualMassModelConfig>,

    /// 升力
    #[serde(default)]
    pub lift: BlendedModelConfig<LiftModelConfig>,

    /// 壁面润滑力
    #[serde(default)]
    pub wall_lubrication: BlendedModelConfig<WallLubricationModelConfig>,

    /// 湍流弥散力
    #[serde(default)]
    pub turbulent_dispersion: BlendedModelConfig<TurbulentDispersionModelConfig>,
}

impl PairConfig {
    /// 创建无模型的相对配置
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            phases: [first.into(), second.into()],
            blending: BlendingConfig::default(),
            drag: BlendedModelConfig::default(),
            virtual_mass: BlendedModelConfig::default(),
            lift: BlendedModelConfig::default(),
            wall_lubrication: BlendedModelConfig::default(),
            turbulent_dispersion: BlendedModelConfig::default(),
        }
    }

    /// 显示名称
    pub fn label(&self) -> String {
        format!("({}, {})", self.phases[0], self.phases[1])
    }
}

/// 运行控制
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// 执行步数
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_steps() -> u64 {
    1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            output_dir: default_output_dir(),
        }
    }
}

fn check_positive(key: String, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "必须为正"))
    }
}

impl CaseConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: CaseConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mesh.n_cells == 0 {
            return Err(ConfigError::invalid("mesh.n_cells", 0, "单元数必须大于零"));
        }
        check_positive("mesh.spacing".to_string(), self.mesh.spacing)?;

        if self.phases.is_empty() {
            return Err(ConfigError::Missing("phases".to_string()));
        }

        for (i, phase) in self.phases.iter().enumerate() {
            let key = format!("phases[{i}]");
            if phase.name.trim().is_empty() {
                return Err(ConfigError::Missing(format!("{key}.name")));
            }
            let (lo, hi) = phase.alpha.bounds();
            if !(lo.is_finite() && hi.is_finite() && lo >= 0.0 && hi <= 1.0) {
                return Err(ConfigError::invalid(
                    format!("{key}.alpha"),
                    format!("[{lo}, {hi}]"),
                    "体积分数必须位于 [0, 1]",
                ));
            }
            if !phase.velocity.is_finite() {
                return Err(ConfigError::invalid(format!("{key}.velocity"), "non-finite", "必须为有限数"));
            }
            if !phase.acceleration.is_finite() {
                return Err(ConfigError::invalid(
                    format!("{key}.acceleration"),
                    "non-finite",
                    "必须为有限数",
                ));
            }
            check_positive(format!("{key}.density"), phase.density)?;
            check_positive(format!("{key}.viscosity"), phase.viscosity)?;
            check_positive(format!("{key}.diameter"), phase.diameter)?;
            if let Some(k) = phase.turbulent_kinetic_energy {
                if !(k.is_finite() && k >= 0.0) {
                    return Err(ConfigError::invalid(
                        format!("{key}.turbulent_kinetic_energy"),
                        k,
                        "湍动能不能为负",
                    ));
                }
            }
        }

        for (i, pair) in self.pairs.iter().enumerate() {
            let key = format!("pairs[{i}]");
            pair.blending.validate(&format!("{key}.blending"))?;
            pair.drag.validate(&format!("{key}.drag"))?;
            pair.virtual_mass.validate(&format!("{key}.virtual_mass"))?;
            pair.lift.validate(&format!("{key}.lift"))?;
            pair.wall_lubrication.validate(&format!("{key}.wall_lubrication"))?;
            pair.turbulent_dispersion.validate(&format!("{key}.turbulent_dispersion"))?;
        }

        for pf in &self.phase_forces {
            pf.validate()?;
        }

        if self.run.steps == 0 {
            return Err(ConfigError::invalid("run.steps", 0, "步数必须大于零"));
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}
