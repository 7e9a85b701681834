// crates/mp_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `MpError` 枚举和 `MpResult` 类型别名，用于整个项目的错误处理。
//!
//! # 错误分类
//!
//! - **配置错误** (`Config` / `InvalidConfig` / `MissingConfig`)：
//!   引用了不存在的相、相对或非法参数，在构建阶段立即报出
//! - **求值错误** (`Evaluation`)：闭合模型在某个单元上输入越界或结果非有限，
//!   中止本步计算，不输出部分结果
//! - **数据错误** (`SizeMismatch` / `IndexOutOfBounds`)：场长度与网格不一致
//!
//! # 示例
//!
//! ```
//! use mp_foundation::error::{MpError, MpResult};
//!
//! fn lookup_phase(name: &str) -> MpResult<()> {
//!     Err(MpError::config(format!("相 '{}' 不存在", name)))
//! }
//!
//! assert!(lookup_phase("water").is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type MpResult<T> = Result<T, MpError>;

/// 项目错误类型
#[derive(Error, Debug)]
pub enum MpError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    // ========================================================================
    // 配置错误
    // ========================================================================

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 缺少配置项
    #[error("缺少必需的配置项: {key}")]
    MissingConfig {
        /// 配置键名
        key: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    // ========================================================================
    // 数据错误
    // ========================================================================

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: String,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 资源未找到
    #[error("资源未找到: {resource}")]
    NotFound {
        /// 资源名称
        resource: String,
    },

    // ========================================================================
    // 计算错误
    // ========================================================================

    /// 闭合模型求值失败
    #[error("模型 {model} 在单元 {cell} 求值失败: {reason}")]
    Evaluation {
        /// 模型名称
        model: String,
        /// 出错单元
        cell: usize,
        /// 失败原因
        reason: String,
    },

    /// 同一时间步内重复写出同名场
    #[error("场 '{name}' 在第 {step} 步已写出")]
    DuplicateWrite {
        /// 场名
        name: String,
        /// 时间步编号
        step: u64,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl MpError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 缺少配置
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 大小不匹配
    pub fn size_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 资源未找到
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// 模型求值失败
    pub fn evaluation(model: impl Into<String>, cell: usize, reason: impl Into<String>) -> Self {
        Self::Evaluation {
            model: model.into(),
            cell,
            reason: reason.into(),
        }
    }

    /// 重复写出
    pub fn duplicate_write(name: impl Into<String>, step: u64) -> Self {
        Self::DuplicateWrite {
            name: name.into(),
            step,
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为配置阶段错误
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::MissingConfig { .. } | Self::InvalidConfig { .. }
        )
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl MpError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &str, expected: usize, actual: usize) -> MpResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> MpResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }
}

/// 条件不满足时返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// 从 `Option` 中取值，`None` 时返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for MpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MpError::config("相 'sand' 不存在");
        assert!(err.to_string().contains("配置错误"));
        assert!(err.to_string().contains("sand"));
        assert!(err.is_config());
    }

    #[test]
    fn test_evaluation_error() {
        let err = MpError::evaluation("SchillerNaumann", 7, "直径非正");
        let msg = err.to_string();
        assert!(msg.contains("SchillerNaumann"));
        assert!(msg.contains('7'));
        assert!(!err.is_config());
    }

    #[test]
    fn test_check_size() {
        assert!(MpError::check_size("alpha.water", 10, 10).is_ok());
        assert!(matches!(
            MpError::check_size("alpha.water", 10, 5),
            Err(MpError::SizeMismatch { expected: 10, actual: 5, .. })
        ));
    }

    #[test]
    fn test_check_index() {
        assert!(MpError::check_index("Phase", 1, 2).is_ok());
        assert!(MpError::check_index("Phase", 2, 2).is_err());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "case.json");
        let err: MpError = io_err.into();
        assert!(matches!(err, MpError::Io { source: Some(_), .. }));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: f64) -> MpResult<()> {
            ensure!(value > 0.0, MpError::invalid_input("密度必须为正"));
            Ok(())
        }

        assert!(check(1000.0).is_ok());
        assert!(check(-1.0).is_err());
    }

    #[test]
    fn test_require_macro() {
        fn get(opt: Option<usize>) -> MpResult<usize> {
            let v = require!(opt, MpError::not_found("phase"));
            Ok(v)
        }

        assert_eq!(get(Some(3)).unwrap(), 3);
        assert!(get(None).is_err());
    }
}
