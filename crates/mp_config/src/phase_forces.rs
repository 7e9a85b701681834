// crates/mp_config/src/phase_forces.rs

//! 相界面力诊断对象配置
//!
//! ```json
//! {
//!     "phase_name": "water",
//!     "forces": { "lift": false },
//!     "field_prefix": "interfacial"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::kind::ForceKind;

/// 各类界面力的输出开关（默认全部开启）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceToggles {
    /// 曳力
    #[serde(default = "default_true")]
    pub drag: bool,
    /// 虚拟质量力
    #[serde(default = "default_true")]
    pub virtual_mass: bool,
    /// 升力
    #[serde(default = "default_true")]
    pub lift: bool,
    /// 壁面润滑力
    #[serde(default = "default_true")]
    pub wall_lubrication: bool,
    /// 湍流弥散力
    #[serde(default = "default_true")]
    pub turbulent_dispersion: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ForceToggles {
    fn default() -> Self {
        Self::all()
    }
}

impl ForceToggles {
    /// 全部开启
    pub fn all() -> Self {
        Self {
            drag: true,
            virtual_mass: true,
            lift: true,
            wall_lubrication: true,
            turbulent_dispersion: true,
        }
    }

    /// 全部关闭
    pub fn none() -> Self {
        Self {
            drag: false,
            virtual_mass: false,
            lift: false,
            wall_lubrication: false,
            turbulent_dispersion: false,
        }
    }

    /// 查询某类型是否开启
    pub fn is_enabled(&self, kind: ForceKind) -> bool {
        match kind {
            ForceKind::Drag => self.drag,
            ForceKind::VirtualMass => self.virtual_mass,
            ForceKind::Lift => self.lift,
            ForceKind::WallLubrication => self.wall_lubrication,
            ForceKind::TurbulentDispersion => self.turbulent_dispersion,
        }
    }

    /// 设置某类型开关
    pub fn set(&mut self, kind: ForceKind, enabled: bool) {
        match kind {
            ForceKind::Drag => self.drag = enabled,
            ForceKind::VirtualMass => self.virtual_mass = enabled,
            ForceKind::Lift => self.lift = enabled,
            ForceKind::WallLubrication => self.wall_lubrication = enabled,
            ForceKind::TurbulentDispersion => self.turbulent_dispersion = enabled,
        }
    }

    /// 按固定顺序返回已开启的类型
    pub fn enabled_kinds(&self) -> Vec<ForceKind> {
        ForceKind::ALL
            .into_iter()
            .filter(|&k| self.is_enabled(k))
            .collect()
    }
}

/// 相界面力诊断对象配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseForcesConfig {
    /// 被统计的相名称
    pub phase_name: String,

    /// 输出开关
    #[serde(default)]
    pub forces: ForceToggles,

    /// 输出场名前缀
    #[serde(default = "default_field_prefix")]
    pub field_prefix: String,

    /// 是否在各力类型之间并行
    #[serde(default)]
    pub parallel_kinds: bool,
}

fn default_field_prefix() -> String {
    "interfacial".to_string()
}

impl PhaseForcesConfig {
    /// 创建默认配置（全部力类型开启）
    pub fn new(phase_name: impl Into<String>) -> Self {
        Self {
            phase_name: phase_name.into(),
            forces: ForceToggles::default(),
            field_prefix: default_field_prefix(),
            parallel_kinds: false,
        }
    }

    /// 设置输出开关
    pub fn with_forces(mut self, forces: ForceToggles) -> Self {
        self.forces = forces;
        self
    }

    /// 关闭某一类型
    pub fn without(mut self, kind: ForceKind) -> Self {
        self.forces.set(kind, false);
        self
    }

    /// 设置场名前缀
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.field_prefix = prefix.into();
        self
    }

    /// 启用力类型间并行
    pub fn with_parallel_kinds(mut self, enabled: bool) -> Self {
        self.parallel_kinds = enabled;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phase_name.trim().is_empty() {
            return Err(ConfigError::Missing("phase_name".to_string()));
        }
        if self.field_prefix.is_empty() || self.field_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "field_prefix",
                &self.field_prefix,
                "前缀不能为空且不能包含空白字符",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let cfg: PhaseForcesConfig = serde_json::from_str(r#"{ "phase_name": "water" }"#).unwrap();
        assert_eq!(cfg.field_prefix, "interfacial");
        assert_eq!(cfg.forces.enabled_kinds(), ForceKind::ALL.to_vec());
        assert!(!cfg.parallel_kinds);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_toggles() {
        let cfg: PhaseForcesConfig = serde_json::from_str(
            r#"{ "phase_name": "air", "forces": { "lift": false, "virtual_mass": false } }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.forces.enabled_kinds(),
            vec![ForceKind::Drag, ForceKind::WallLubrication, ForceKind::TurbulentDispersion]
        );
    }

    #[test]
    fn test_builder_helpers() {
        let cfg = PhaseForcesConfig::new("sand")
            .without(ForceKind::Drag)
            .with_prefix("forces")
            .with_parallel_kinds(true);
        assert!(!cfg.forces.is_enabled(ForceKind::Drag));
        assert_eq!(cfg.field_prefix, "forces");
        assert!(cfg.parallel_kinds);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(PhaseForcesConfig::new("  ").validate().is_err());
        assert!(PhaseForcesConfig::new("water").with_prefix("a b").validate().is_err());
    }
}
