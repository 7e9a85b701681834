// crates/mp_config/src/kind.rs

//! 界面力类型
//!
//! 五类界面动量交换力及其作用规则：
//!
//! | 类型 | 作用方式 |
//! |------|----------|
//! | Drag | 对称：两相均可作为分散相，允许相对级（分层）模型 |
//! | VirtualMass | 对称 |
//! | Lift | 仅分散相：只接受"分散于"视角的模型 |
//! | WallLubrication | 仅分散相 |
//! | TurbulentDispersion | 仅分散相 |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 界面力类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForceKind {
    /// 曳力
    Drag,
    /// 虚拟质量力
    VirtualMass,
    /// 升力
    Lift,
    /// 壁面润滑力
    WallLubrication,
    /// 湍流弥散力
    TurbulentDispersion,
}

impl ForceKind {
    /// 类型数量
    pub const COUNT: usize = 5;

    /// 按固定顺序列出全部类型
    pub const ALL: [ForceKind; ForceKind::COUNT] = [
        ForceKind::Drag,
        ForceKind::VirtualMass,
        ForceKind::Lift,
        ForceKind::WallLubrication,
        ForceKind::TurbulentDispersion,
    ];

    /// 在 [`ForceKind::ALL`] 中的位置
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ForceKind::Drag => 0,
            ForceKind::VirtualMass => 1,
            ForceKind::Lift => 2,
            ForceKind::WallLubrication => 3,
            ForceKind::TurbulentDispersion => 4,
        }
    }

    /// 输出字段中使用的名称
    pub const fn name(self) -> &'static str {
        match self {
            ForceKind::Drag => "Drag",
            ForceKind::VirtualMass => "VirtualMass",
            ForceKind::Lift => "Lift",
            ForceKind::WallLubrication => "WallLubrication",
            ForceKind::TurbulentDispersion => "TurbulentDispersion",
        }
    }

    /// 配置文件中使用的键名
    pub const fn key(self) -> &'static str {
        match self {
            ForceKind::Drag => "drag",
            ForceKind::VirtualMass => "virtual_mass",
            ForceKind::Lift => "lift",
            ForceKind::WallLubrication => "wall_lubrication",
            ForceKind::TurbulentDispersion => "turbulent_dispersion",
        }
    }

    /// 是否对称作用（可带相对级模型）
    #[inline]
    pub const fn is_symmetric(self) -> bool {
        matches!(self, ForceKind::Drag | ForceKind::VirtualMass)
    }

    /// 是否只在分散相上定义
    #[inline]
    pub const fn is_dispersed_only(self) -> bool {
        !self.is_symmetric()
    }
}

impl fmt::Display for ForceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ForceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForceKind::ALL
            .into_iter()
            .find(|k| k.key() == s || k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::invalid("force_kind", s, "未知的界面力类型"))
    }
}
