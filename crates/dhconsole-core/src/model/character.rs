use super::affix::{RelicSlot, sub_affix_index};
use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Highest enhancement level a relic can reach.
pub const MAX_RELIC_LEVEL: u32 = 15;
/// A relic carries at most this many sub affixes.
pub const MAX_SUB_AFFIXES: usize = 4;
/// Bounds for a single sub affix roll count.
pub const SUB_AFFIX_LEVEL_RANGE: std::ops::RangeInclusive<u32> = 1..=6;
/// Accepted roll-count totals for a fully upgraded relic.
///
/// Four initial rolls plus five upgrades gives 9; three initial rolls plus a
/// fourth affix unlocked at +3 and four further upgrades gives 8.
pub const FULL_RELIC_TOTALS: [u32; 2] = [8, 9];

/// A character as reported by `fetch avatar`.
///
/// Every field is optional because the server may omit whole sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub path_id: Option<u32>,
    pub level: Option<u32>,
    pub rank: Option<u32>,
    /// Skill index → level.
    pub talent: BTreeMap<u32, u32>,
    pub equip_id: Option<u32>,
    pub equip_level: Option<u32>,
    pub equip_rank: Option<u32>,
    pub relics: BTreeMap<RelicSlot, Relic>,
}

impl Character {
    /// True when no section of the response was recognized.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A relic and its affixes.
///
/// `sub_affixes`, `sub_affix_levels` and `sub_affix_steps` are parallel lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relic {
    pub relic_id: u32,
    pub level: u32,
    pub main_affix: String,
    pub sub_affixes: Vec<String>,
    pub sub_affix_levels: Vec<u32>,
    pub sub_affix_steps: Vec<u32>,
}

impl Relic {
    /// Sum of sub affix roll counts.
    pub fn total_sub_affix_levels(&self) -> u32 {
        self.sub_affix_levels.iter().sum()
    }

    /// Checks the relic against the affix rules before it is sent.
    ///
    /// Rules:
    /// - level at most 15
    /// - main affix belongs to the slot's table
    /// - at most four distinct, known sub affixes, none equal to the main affix
    /// - every roll count within 1..=6
    /// - roll counts total 8 or 9 on a level 15 relic, and never exceed 9
    pub fn validate(&self, slot: RelicSlot) -> Result<()> {
        if self.level > MAX_RELIC_LEVEL {
            return Err(ConsoleError::invalid_argument(format!(
                "relic level {} exceeds {}",
                self.level, MAX_RELIC_LEVEL
            )));
        }
        if slot.main_affix_index(&self.main_affix).is_none() {
            return Err(ConsoleError::invalid_argument(format!(
                "main affix '{}' is not available on {} relics",
                self.main_affix, slot
            )));
        }
        if self.sub_affixes.len() > MAX_SUB_AFFIXES {
            return Err(ConsoleError::invalid_argument(format!(
                "a relic has at most {} sub affixes, got {}",
                MAX_SUB_AFFIXES,
                self.sub_affixes.len()
            )));
        }
        if self.sub_affixes.len() != self.sub_affix_levels.len() {
            return Err(ConsoleError::invalid_argument(
                "sub affix names and levels differ in length",
            ));
        }

        let mut seen = HashSet::new();
        for (name, level) in self.sub_affixes.iter().zip(&self.sub_affix_levels) {
            if sub_affix_index(name).is_none() {
                return Err(ConsoleError::invalid_argument(format!(
                    "unknown sub affix '{name}'"
                )));
            }
            if name == &self.main_affix {
                return Err(ConsoleError::invalid_argument(format!(
                    "sub affix '{name}' duplicates the main affix"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConsoleError::invalid_argument(format!(
                    "sub affix '{name}' appears twice"
                )));
            }
            if !SUB_AFFIX_LEVEL_RANGE.contains(level) {
                return Err(ConsoleError::invalid_argument(format!(
                    "sub affix '{name}' level {level} outside 1..=6"
                )));
            }
        }

        let total = self.total_sub_affix_levels();
        let max_total = FULL_RELIC_TOTALS[1];
        if total > max_total {
            return Err(ConsoleError::invalid_argument(format!(
                "sub affix levels total {total}, at most {max_total} allowed"
            )));
        }
        if self.level == MAX_RELIC_LEVEL && !FULL_RELIC_TOTALS.contains(&total) {
            return Err(ConsoleError::invalid_argument(format!(
                "a level {MAX_RELIC_LEVEL} relic needs sub affix levels totalling 8 or 9, got {total}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_relic() -> Relic {
        Relic {
            relic_id: 61011,
            level: 15,
            main_affix: "HPDelta".into(),
            sub_affixes: vec![
                "CriticalChanceBase".into(),
                "CriticalDamageBase".into(),
                "AttackAddedRatio".into(),
                "SpeedDelta".into(),
            ],
            sub_affix_levels: vec![1, 3, 2, 3],
            sub_affix_steps: vec![1, 3, 2, 3],
        }
    }

    #[test]
    fn test_full_relic_is_valid() {
        assert!(full_relic().validate(RelicSlot::Head).is_ok());
    }

    #[test]
    fn test_total_of_eight_is_valid() {
        let mut relic = full_relic();
        relic.sub_affix_levels = vec![1, 2, 2, 3];
        assert!(relic.validate(RelicSlot::Head).is_ok());
    }

    #[test]
    fn test_full_relic_with_low_total_is_rejected() {
        let mut relic = full_relic();
        relic.sub_affix_levels = vec![1, 1, 1, 2];
        let err = relic.validate(RelicSlot::Head).unwrap_err();
        assert!(err.to_string().contains("8 or 9"));
    }

    #[test]
    fn test_low_level_relic_may_have_low_total() {
        let mut relic = full_relic();
        relic.level = 6;
        relic.sub_affix_levels = vec![1, 1, 2, 1];
        assert!(relic.validate(RelicSlot::Head).is_ok());
    }

    #[test]
    fn test_total_above_nine_is_rejected() {
        let mut relic = full_relic();
        relic.level = 9;
        relic.sub_affix_levels = vec![1, 3, 3, 3];
        assert!(relic.validate(RelicSlot::Head).is_err());
    }

    #[test]
    fn test_zero_level_sub_affix_is_rejected() {
        let mut relic = full_relic();
        relic.sub_affix_levels = vec![0, 3, 3, 3];
        assert!(relic.validate(RelicSlot::Head).is_err());
    }

    #[test]
    fn test_main_affix_must_match_slot() {
        assert!(full_relic().validate(RelicSlot::Hand).is_err());
    }

    #[test]
    fn test_duplicate_sub_affix_is_rejected() {
        let mut relic = full_relic();
        relic.sub_affixes[1] = "CriticalChanceBase".into();
        assert!(relic.validate(RelicSlot::Head).is_err());
    }

    #[test]
    fn test_sub_affix_equal_to_main_is_rejected() {
        let mut relic = full_relic();
        relic.sub_affixes[0] = "HPDelta".into();
        assert!(relic.validate(RelicSlot::Head).is_err());
    }

    #[test]
    fn test_empty_character() {
        assert!(Character::default().is_empty());
        let character = Character {
            level: Some(80),
            ..Character::default()
        };
        assert!(!character.is_empty());
    }
}
