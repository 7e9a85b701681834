// crates/mp_foundation/src/lib.rs

//! Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型与强类型索引。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `MpError` / `MpResult`
//! - [`index`]: 相索引与相对索引
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **类型安全**: 编译期区分相索引与相对索引

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod index;

// 重导出常用类型
pub use error::{MpError, MpResult};
pub use index::{Idx, PairIndex, PhaseIndex};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{MpError, MpResult};
    pub use crate::index::{Idx, PairIndex, PhaseIndex};
    pub use crate::{ensure, require};
}
