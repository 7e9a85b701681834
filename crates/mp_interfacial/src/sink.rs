// crates/mp_interfacial/src/sink.rs

//! 场输出
//!
//! [`FieldSink`] 是求解器输出数据库的最小接口：按名称写出一个逐单元向量场。
//! [`FieldDatabase`] 是内存实现，每个时间步内同名场只能写出一次。
//!
//! # 场名规则
//!
//! 非空，只含 ASCII 字母、数字与 `_ : . -`，例如 `interfacial:Drag.water`。

use glam::DVec3;
use mp_foundation::{MpError, MpResult};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::fields::VectorField;

/// 场写出错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// 无效场名
    #[error("无效的场名 '{0}'：只能包含字母、数字与 _ : . -")]
    InvalidName(String),

    /// 同一步重复写出
    #[error("场 '{name}' 在第 {step} 步已写出")]
    Duplicate {
        /// 场名
        name: String,
        /// 时间步
        step: u64,
    },
}

impl From<FieldError> for MpError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::InvalidName(name) => {
                MpError::invalid_input(format!("无效的场名 '{}'", name))
            }
            FieldError::Duplicate { name, step } => MpError::duplicate_write(name, step),
        }
    }
}

/// 场名是否合法
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}

/// 场输出接口
pub trait FieldSink {
    /// 写出一个逐单元向量场
    fn write_field(&mut self, name: &str, field: &VectorField) -> MpResult<()>;
}

/// 场统计摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    /// 场名
    pub name: String,
    /// 单元数
    pub n_cells: usize,
    /// 最大模长
    pub max_magnitude: f64,
    /// 单元平均值
    pub mean: [f64; 3],
}

impl FieldSummary {
    /// 由场计算摘要
    pub fn of(name: &str, field: &VectorField) -> Self {
        let mean: DVec3 = field.mean();
        Self {
            name: name.to_string(),
            n_cells: field.len(),
            max_magnitude: field.max_magnitude(),
            mean: mean.to_array(),
        }
    }
}

/// 内存场数据库
#[derive(Debug, Default)]
pub struct FieldDatabase {
    step: u64,
    fields: BTreeMap<String, VectorField>,
    written: BTreeSet<String>,
}

impl FieldDatabase {
    /// 创建空数据库
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新的时间步，清空本步写出记录（已有场保留）
    pub fn begin_step(&mut self, step: u64) {
        self.step = step;
        self.written.clear();
    }

    /// 当前时间步
    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// 按名称获取场
    pub fn get(&self, name: &str) -> Option<&VectorField> {
        self.fields.get(name)
    }

    /// 全部场名（字典序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// 场数量
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 全部场的统计摘要
    pub fn summaries(&self) -> Vec<FieldSummary> {
        self.fields
            .iter()
            .map(|(name, field)| FieldSummary::of(name, field))
            .collect()
    }

    fn try_write(&mut self, name: &str, field: &VectorField) -> Result<(), FieldError> {
        if !is_valid_field_name(name) {
            return Err(FieldError::InvalidName(name.to_string()));
        }
        if !self.written.insert(name.to_string()) {
            return Err(FieldError::Duplicate {
                name: name.to_string(),
                step: self.step,
            });
        }
        self.fields.insert(name.to_string(), field.clone());
        Ok(())
    }
}

impl FieldSink for FieldDatabase {
    fn write_field(&mut self, name: &str, field: &VectorField) -> MpResult<()> {
        self.try_write(name, field).map_err(MpError::from)
    }
}
