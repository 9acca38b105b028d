use super::{match_lines, split_pair};
use crate::model::affix::sub_affix;
use crate::model::{Relic, RelicSlot};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Recommended relics are always described at max enhancement.
pub const RECOMMENDED_RELIC_LEVEL: u32 = 15;

static ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d+)\]\s+(.+)$").expect("recommend row pattern"));

/// Parses the table returned by `build recommend`.
///
/// Each row is `[slot] relicId mainAffixIndex subIndex:level ...` with 1-based
/// indices into the slot's main affix table and the shared sub affix table.
/// Rows with an unknown slot or main affix are dropped; unresolvable sub affix
/// entries are dropped from their row.
pub fn parse_relic_recommend(text: &str) -> BTreeMap<RelicSlot, Relic> {
    match_lines(text, |line| {
        let captures = ROW.captures(line)?;
        let slot = RelicSlot::from_index(captures[1].parse().ok()?)?;
        let mut parts = captures.get(2)?.as_str().split_whitespace();
        let relic_id = parts.next()?.parse().ok()?;
        let main_affix = slot.main_affix(parts.next()?.parse().ok()?)?;

        let mut relic = Relic {
            relic_id,
            level: RECOMMENDED_RELIC_LEVEL,
            main_affix: main_affix.to_string(),
            ..Relic::default()
        };
        for part in parts {
            let Some((index, level)) = split_pair(part) else {
                continue;
            };
            let (Some(name), Ok(level)) = (index.parse().ok().and_then(sub_affix), level.parse()) else {
                continue;
            };
            relic.sub_affixes.push(name.to_string());
            relic.sub_affix_levels.push(level);
        }
        relic.sub_affix_steps = relic.sub_affix_levels.clone();

        Some((slot, relic))
    })
    .collect()
}
