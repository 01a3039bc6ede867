//! 目标循环与题组查表

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::error::{ConfigError, CycleError};
use crate::models::slot::{Slot, SLOT_COUNT};
use crate::rules::tables::DEFAULT_CYCLES;

/// 目标循环：A/B/C/D 的一个排列
///
/// 第 `i` 道题（从 0 开始）的正确答案应放在 `cycle[i % 4]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCycle([Slot; SLOT_COUNT]);

impl TargetCycle {
    /// 默认循环 A→B→C→D
    pub const DEFAULT: TargetCycle = TargetCycle(Slot::ALL);

    /// 校验并创建循环
    pub fn new(slots: &[Slot]) -> Result<Self, CycleError> {
        if slots.len() != SLOT_COUNT {
            return Err(CycleError::WrongLength(slots.len()));
        }
        let mut seen = [false; SLOT_COUNT];
        let mut cycle = [Slot::A; SLOT_COUNT];
        for (i, slot) in slots.iter().enumerate() {
            if seen[slot.index()] {
                return Err(CycleError::Duplicate(slot.letter()));
            }
            seen[slot.index()] = true;
            cycle[i] = *slot;
        }
        Ok(Self(cycle))
    }

    /// 从字母列表解析，如 `["C", "A", "D", "B"]`
    pub fn parse<I, S>(letters: I) -> Result<Self, CycleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots = letters
            .into_iter()
            .map(|letter| {
                let letter = letter.as_ref();
                Slot::parse(letter).ok_or_else(|| CycleError::UnknownLetter(letter.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&slots)
    }

    /// 第 `position` 道题的目标位置
    pub fn slot_for(&self, position: usize) -> Slot {
        self.0[position % SLOT_COUNT]
    }
}

impl Default for TargetCycle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for TargetCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letters: Vec<String> = self.0.iter().map(Slot::to_string).collect();
        write!(f, "{}", letters.join("→"))
    }
}

/// 题组标识 → 目标循环
#[derive(Debug, Clone)]
pub struct CycleTable {
    cycles: HashMap<String, TargetCycle>,
}

impl Default for CycleTable {
    fn default() -> Self {
        let cycles = DEFAULT_CYCLES
            .entries()
            .filter_map(|(set_id, slots)| match TargetCycle::new(slots) {
                Ok(cycle) => Some((set_id.to_string(), cycle)),
                Err(e) => {
                    warn!("内置循环 {} 无效，已忽略: {}", set_id, e);
                    None
                }
            })
            .collect();
        Self { cycles }
    }
}

impl CycleTable {
    /// 合并清单中的循环配置，任何一个无效都会整体失败
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        for (set_id, letters) in overrides {
            let cycle = TargetCycle::parse(letters).map_err(|source| ConfigError::InvalidCycle {
                set_id: set_id.clone(),
                source,
            })?;
            debug!("题组 {} 使用清单循环 {}", set_id, cycle);
            self.cycles.insert(set_id.clone(), cycle);
        }
        Ok(self)
    }

    /// 查找题组的目标循环；未知题组返回默认循环
    pub fn resolve(&self, set_id: &str) -> TargetCycle {
        self.cycles.get(set_id).copied().unwrap_or_default()
    }

    pub fn is_known(&self, set_id: &str) -> bool {
        self.cycles.contains_key(set_id)
    }
}
