// crates/mp_interfacial/src/fields.rs

//! 单元场存储
//!
//! 所有场都按单元存储，长度等于网格单元数：
//! - [`ScalarField`]: 每单元一个 f64（体积分数、密度、直径……）
//! - [`VectorField`]: 每单元一个 `DVec3`（速度、力密度……）
//!
//! 逐单元计算互不依赖，超过阈值时使用 rayon 并行，结果与串行完全一致。

use glam::DVec3;
use mp_foundation::{MpError, MpResult};
use rayon::prelude::*;
use std::ops::{AddAssign, Index, Neg, SubAssign};

/// 默认并行阈值（单元数）
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// 逐单元并行配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// 是否启用并行
    pub enabled: bool,
    /// 并行阈值（单元数）
    pub threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// 始终串行
    pub fn serial() -> Self {
        Self {
            enabled: false,
            threshold: usize::MAX,
        }
    }

    /// 始终并行（测试用）
    pub fn always() -> Self {
        Self {
            enabled: true,
            threshold: 0,
        }
    }

    /// 给定单元数时是否走并行路径
    #[inline]
    pub fn should_parallelize(&self, n_cells: usize) -> bool {
        self.enabled && n_cells >= self.threshold
    }
}

/// 逐单元求值，任一单元失败则整体失败
pub fn map_cells<T, F>(n_cells: usize, parallel: ParallelConfig, f: F) -> MpResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> MpResult<T> + Send + Sync,
{
    if parallel.should_parallelize(n_cells) {
        (0..n_cells).into_par_iter().map(f).collect()
    } else {
        (0..n_cells).map(f).collect()
    }
}

// ============================================================
// 标量场
// ============================================================

/// 单元标量场
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    values: Vec<f64>,
}

impl ScalarField {
    /// 全零场
    pub fn zeros(n_cells: usize) -> Self {
        Self::uniform(n_cells, 0.0)
    }

    /// 均匀场
    pub fn uniform(n_cells: usize, value: f64) -> Self {
        Self {
            values: vec![value; n_cells],
        }
    }

    /// 由逐单元函数构造
    pub fn from_fn(n_cells: usize, f: impl Fn(usize) -> f64) -> Self {
        Self {
            values: (0..n_cells).map(f).collect(),
        }
    }

    /// 单元数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 只读切片
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// 可写切片（长度不可变）
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// 迭代器
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl From<Vec<f64>> for ScalarField {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl Index<usize> for ScalarField {
    type Output = f64;

    #[inline]
    fn index(&self, cell: usize) -> &f64 {
        &self.values[cell]
    }
}

// ============================================================
// 向量场
// ============================================================

/// 单元向量场
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    values: Vec<DVec3>,
}

impl VectorField {
    /// 全零场
    pub fn zeros(n_cells: usize) -> Self {
        Self::uniform(n_cells, DVec3::ZERO)
    }

    /// 均匀场
    pub fn uniform(n_cells: usize, value: DVec3) -> Self {
        Self {
            values: vec![value; n_cells],
        }
    }

    /// 由逐单元函数构造
    pub fn from_fn(n_cells: usize, f: impl Fn(usize) -> DVec3) -> Self {
        Self {
            values: (0..n_cells).map(f).collect(),
        }
    }

    /// 单元数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 只读切片
    #[inline]
    pub fn as_slice(&self) -> &[DVec3] {
        &self.values
    }

    /// 可写切片（长度不可变）
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [DVec3] {
        &mut self.values
    }

    /// 迭代器
    pub fn iter(&self) -> std::slice::Iter<'_, DVec3> {
        self.values.iter()
    }

    /// 提取某一分量
    pub fn component(&self, axis: usize) -> ScalarField {
        debug_assert!(axis < 3);
        ScalarField::from(self.values.iter().map(|v| v[axis]).collect::<Vec<_>>())
    }

    /// 每个单元都严格为零
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == DVec3::ZERO)
    }

    /// 第一个非有限值所在单元
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }

    /// 最大模长
    pub fn max_magnitude(&self) -> f64 {
        self.values.iter().map(|v| v.length()).fold(0.0, f64::max)
    }

    /// 单元平均值
    pub fn mean(&self) -> DVec3 {
        if self.values.is_empty() {
            return DVec3::ZERO;
        }
        self.values.iter().fold(DVec3::ZERO, |acc, v| acc + *v) / self.values.len() as f64
    }

    /// 检查长度
    pub fn check_len(&self, name: &str, expected: usize) -> MpResult<()> {
        MpError::check_size(name, expected, self.len())
    }
}

impl From<Vec<DVec3>> for VectorField {
    fn from(values: Vec<DVec3>) -> Self {
        Self { values }
    }
}

impl Index<usize> for VectorField {
    type Output = DVec3;

    #[inline]
    fn index(&self, cell: usize) -> &DVec3 {
        &self.values[cell]
    }
}

impl AddAssign<&VectorField> for VectorField {
    fn add_assign(&mut self, rhs: &VectorField) {
        assert_eq!(self.len(), rhs.len(), "向量场长度不一致");
        for (dst, &src) in self.values.iter_mut().zip(rhs.values.iter()) {
            *dst += src;
        }
    }
}

impl SubAssign<&VectorField> for VectorField {
    fn sub_assign(&mut self, rhs: &VectorField) {
        assert_eq!(self.len(), rhs.len(), "向量场长度不一致");
        for (dst, &src) in self.values.iter_mut().zip(rhs.values.iter()) {
            *dst -= src;
        }
    }
}

impl Neg for VectorField {
    type Output = VectorField;

    fn neg(mut self) -> VectorField {
        for v in &mut self.values {
            *v = -*v;
        }
        self
    }
}
