// crates/mp_interfacial/src/pair.rs

//! 相对注册表
//!
//! 相对为无序对，按注册时给出的顺序存为 (phase1, phase2)。
//! "第一相分散于第二相"即 phase1 为分散相。
//!
//! 查询某相参与的全部相对时按注册顺序返回，每个相对恰好出现一次，
//! 并给出查询相所在的一侧：
//!
//! ```text
//! pairs: (air, water), (sand, water), (air, sand)
//! pairs_containing(water) -> [#0 Second, #1 Second]
//! pairs_containing(air)   -> [#0 First,  #2 First]
//! ```

use mp_foundation::{MpError, MpResult, PairIndex, PhaseIndex};
use std::fmt;

/// 查询相在相对中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairSide {
    /// 查询相为 phase1
    First,
    /// 查询相为 phase2
    Second,
}

impl PairSide {
    /// 相对结果（作用于 phase1 的力）换算到该侧时的符号
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            PairSide::First => 1.0,
            PairSide::Second => -1.0,
        }
    }

    /// 另一侧
    #[inline]
    pub const fn other(self) -> PairSide {
        match self {
            PairSide::First => PairSide::Second,
            PairSide::Second => PairSide::First,
        }
    }
}

impl fmt::Display for PairSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairSide::First => write!(f, "first"),
            PairSide::Second => write!(f, "second"),
        }
    }
}

/// 相对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhasePair {
    first: PhaseIndex,
    second: PhaseIndex,
}

impl PhasePair {
    /// 创建相对，两相必须不同
    pub fn new(first: PhaseIndex, second: PhaseIndex) -> MpResult<Self> {
        if first == second {
            return Err(MpError::config(format!("相对两端为同一相 {}", first)));
        }
        Ok(Self { first, second })
    }

    /// phase1
    #[inline]
    pub fn first(&self) -> PhaseIndex {
        self.first
    }

    /// phase2
    #[inline]
    pub fn second(&self) -> PhaseIndex {
        self.second
    }

    /// 指定侧的相
    #[inline]
    pub fn phase(&self, side: PairSide) -> PhaseIndex {
        match side {
            PairSide::First => self.first,
            PairSide::Second => self.second,
        }
    }

    /// 是否包含某相
    #[inline]
    pub fn contains(&self, phase: PhaseIndex) -> bool {
        self.first == phase || self.second == phase
    }

    /// 某相所在的一侧
    pub fn side_of(&self, phase: PhaseIndex) -> Option<PairSide> {
        if phase == self.first {
            Some(PairSide::First)
        } else if phase == self.second {
            Some(PairSide::Second)
        } else {
            None
        }
    }

    /// 另一相
    pub fn other(&self, phase: PhaseIndex) -> Option<PhaseIndex> {
        self.side_of(phase).map(|side| self.phase(side.other()))
    }

    /// 是否与另一相对为同一无序对
    #[inline]
    pub fn same_phases(&self, other: &PhasePair) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl fmt::Display for PhasePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// 查询结果：一个包含查询相的相对
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairMembership {
    /// 相对索引
    pub index: PairIndex,
    /// 相对
    pub pair: PhasePair,
    /// 查询相所在侧
    pub side: PairSide,
}

impl PairMembership {
    /// 查询相的伙伴相
    #[inline]
    pub fn partner(&self) -> PhaseIndex {
        self.pair.phase(self.side.other())
    }
}

/// 相对注册表
#[derive(Debug, Clone, Default)]
pub struct PhasePairRegistry {
    pairs: Vec<PhasePair>,
}

impl PhasePairRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册相对，重复（任一顺序）为配置错误
    pub fn register(&mut self, pair: PhasePair) -> MpResult<PairIndex> {
        if let Some(existing) = self.find(pair.first(), pair.second()) {
            return Err(MpError::config(format!(
                "相对 {} 与已注册的相对 #{} 重复",
                pair, existing
            )));
        }
        let idx = PairIndex::from_usize(self.pairs.len());
        self.pairs.push(pair);
        Ok(idx)
    }

    /// 查找两相组成的相对（不区分顺序）
    pub fn find(&self, a: PhaseIndex, b: PhaseIndex) -> Option<PairIndex> {
        self.pairs
            .iter()
            .position(|p| (p.first() == a && p.second() == b) || (p.first() == b && p.second() == a))
            .map(PairIndex::from_usize)
    }

    /// 按索引获取
    pub fn get(&self, idx: PairIndex) -> Option<&PhasePair> {
        self.pairs.get(idx.get())
    }

    /// 相对数量
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 按注册顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (PairIndex, &PhasePair)> {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, p)| (PairIndex::from_usize(i), p))
    }

    /// 包含某相的全部相对，按注册顺序
    pub fn pairs_containing(&self, phase: PhaseIndex) -> impl Iterator<Item = PairMembership> + '_ {
        self.iter().filter_map(move |(index, pair)| {
            pair.side_of(phase).map(|side| PairMembership {
                index,
                pair: *pair,
                side,
            })
        })
    }

    /// 检查全部端点都在 `0..n_phases` 内
    pub fn validate_against(&self, n_phases: usize) -> MpResult<()> {
        for (idx, pair) in self.iter() {
            for phase in [pair.first(), pair.second()] {
                if phase.get() >= n_phases {
                    return Err(MpError::config(format!(
                        "相对 #{} 引用了不存在的相 {}（共 {} 相）",
                        idx, phase, n_phases
                    )));
                }
            }
        }
        Ok(())
    }
}
