//! Static relic affix tables.
//!
//! Main affixes are fixed per slot; sub affixes share one ordered list. The
//! server addresses both with 1-based indices into these tables.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Relic slot, numbered 1..=6 on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum RelicSlot {
    Head = 1,
    Hand = 2,
    Body = 3,
    Foot = 4,
    Neck = 5,
    Object = 6,
}

impl RelicSlot {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            1 => Some(Self::Head),
            2 => Some(Self::Hand),
            3 => Some(Self::Body),
            4 => Some(Self::Foot),
            5 => Some(Self::Neck),
            6 => Some(Self::Object),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    /// Main affixes this slot can roll, in server index order.
    pub fn main_affixes(self) -> &'static [&'static str] {
        match self {
            Self::Head => HEAD_MAIN_AFFIXES,
            Self::Hand => HAND_MAIN_AFFIXES,
            Self::Body => BODY_MAIN_AFFIXES,
            Self::Foot => FOOT_MAIN_AFFIXES,
            Self::Neck => NECK_MAIN_AFFIXES,
            Self::Object => OBJECT_MAIN_AFFIXES,
        }
    }

    /// Resolves a 1-based main affix index.
    pub fn main_affix(self, index: u32) -> Option<&'static str> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.main_affixes().get(position).copied()
    }

    /// 1-based index of `name` in this slot's main affix table.
    pub fn main_affix_index(self, name: &str) -> Option<u32> {
        self.main_affixes()
            .iter()
            .position(|affix| *affix == name)
            .map(|position| position as u32 + 1)
    }
}

const HEAD_MAIN_AFFIXES: &[&str] = &["HPDelta"];
const HAND_MAIN_AFFIXES: &[&str] = &["AttackDelta"];
const BODY_MAIN_AFFIXES: &[&str] = &[
    "HPAddedRatio",
    "AttackAddedRatio",
    "DefenceAddedRatio",
    "CriticalChanceBase",
    "CriticalDamageBase",
    "HealRatioBase",
    "StatusProbabilityBase",
];
const FOOT_MAIN_AFFIXES: &[&str] = &[
    "HPAddedRatio",
    "AttackAddedRatio",
    "DefenceAddedRatio",
    "SpeedDelta",
];
const NECK_MAIN_AFFIXES: &[&str] = &[
    "HPAddedRatio",
    "AttackAddedRatio",
    "DefenceAddedRatio",
    "PhysicalAddedRatio",
    "FireAddedRatio",
    "IceAddedRatio",
    "ThunderAddedRatio",
    "WindAddedRatio",
    "QuantumAddedRatio",
    "ImaginaryAddedRatio",
];
const OBJECT_MAIN_AFFIXES: &[&str] = &[
    "BreakDamageAddedRatioBase",
    "SPRatioBase",
    "HPAddedRatio",
    "AttackAddedRatio",
    "DefenceAddedRatio",
];

/// Shared sub affix table.
pub const SUB_AFFIXES: &[&str] = &[
    "HPDelta",
    "AttackDelta",
    "DefenceDelta",
    "HPAddedRatio",
    "AttackAddedRatio",
    "DefenceAddedRatio",
    "SpeedDelta",
    "CriticalChanceBase",
    "CriticalDamageBase",
    "StatusProbabilityBase",
    "StatusResistanceBase",
    "BreakDamageAddedRatioBase",
];

/// Resolves a 1-based sub affix index.
pub fn sub_affix(index: u32) -> Option<&'static str> {
    let position = usize::try_from(index).ok()?.checked_sub(1)?;
    SUB_AFFIXES.get(position).copied()
}

/// 1-based index of `name` in the sub affix table.
pub fn sub_affix_index(name: &str) -> Option<u32> {
    SUB_AFFIXES
        .iter()
        .position(|affix| *affix == name)
        .map(|position| position as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_slot_indices_round_trip() {
        for slot in RelicSlot::iter() {
            assert_eq!(RelicSlot::from_index(slot.index()), Some(slot));
        }
        assert_eq!(RelicSlot::from_index(0), None);
        assert_eq!(RelicSlot::from_index(7), None);
    }

    #[test]
    fn test_main_affix_is_one_based() {
        assert_eq!(RelicSlot::Body.main_affix(4), Some("CriticalChanceBase"));
        assert_eq!(RelicSlot::Body.main_affix(0), None);
        assert_eq!(RelicSlot::Head.main_affix(2), None);
        assert_eq!(RelicSlot::Foot.main_affix_index("SpeedDelta"), Some(4));
        assert_eq!(RelicSlot::Foot.main_affix_index("HPDelta"), None);
    }

    #[test]
    fn test_sub_affix_lookup() {
        assert_eq!(sub_affix(8), Some("CriticalChanceBase"));
        assert_eq!(sub_affix(13), None);
        assert_eq!(sub_affix_index("BreakDamageAddedRatioBase"), Some(12));
        // Exact names only; no substring matches.
        assert_eq!(sub_affix_index("HP"), None);
    }
}
