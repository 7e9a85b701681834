// crates/mp_config/src/error.rs

//! 配置层错误类型

use mp_foundation::MpError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),
}

impl ConfigError {
    /// 构造无效值错误
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for MpError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => MpError::io_with_source("读取配置文件失败", e),
            ConfigError::Parse(msg) => MpError::serialization(msg),
            ConfigError::InvalidValue { key, value, reason } => {
                MpError::invalid_config(key, value, reason)
            }
            ConfigError::Missing(key) => MpError::missing_config(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("phases[0].density", -1.0, "必须为正");
        assert!(err.to_string().contains("phases[0].density"));
    }

    #[test]
    fn test_into_mp_error_keeps_category() {
        let err: MpError = ConfigError::invalid("mesh.n_cells", 0, "必须大于零").into();
        assert!(err.is_config());

        let err: MpError = ConfigError::Missing("phase_name".into()).into();
        assert!(err.is_config());
    }
}
