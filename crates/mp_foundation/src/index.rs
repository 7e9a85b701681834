// crates/mp_foundation/src/index.rs

//! 强类型索引
//!
//! 使用 Phantom Type 区分相索引与相对索引，避免把一个相的序号当作相对序号使用。
//! 索引在注册后永不失效（相与相对只增不删），因此不携带代际号。
//!
//! # 示例
//!
//! ```
//! use mp_foundation::index::{PhaseIndex, PairIndex};
//!
//! let water = PhaseIndex::new(0);
//! let pair = PairIndex::new(2);
//! assert_eq!(water.get(), 0);
//! assert_eq!(pair.get(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// 相索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseTag;

/// 相对索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairTag;

/// 泛型索引
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Idx<T> {
    index: u32,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

// 手动实现 Copy 和 Clone，因为 PhantomData<T> 的 Copy 需要 T: Copy
impl<T> Copy for Idx<T> {}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Idx<T> {
    /// 创建新索引
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// 从 usize 创建
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        Self::new(index as u32)
    }

    /// 获取索引值
    #[inline]
    pub const fn get(self) -> usize {
        self.index as usize
    }
}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Idx<T> {}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Idx<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.index)
    }
}

impl<T> fmt::Display for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl<T> From<usize> for Idx<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::from_usize(index)
    }
}

impl<T> From<Idx<T>> for usize {
    #[inline]
    fn from(idx: Idx<T>) -> usize {
        idx.get()
    }
}

/// 相索引
pub type PhaseIndex = Idx<PhaseTag>;

/// 相对索引
pub type PairIndex = Idx<PairTag>;
