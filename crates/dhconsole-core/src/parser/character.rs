use super::split_pair;
use crate::model::{Character, Relic, RelicSlot};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

static SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]*)\]\s*(.*)$").expect("section pattern"));
static SUB_AFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)-(\d+)\+(\d+)$").expect("sub affix pattern"));

/// Parses the bracket-section response of `fetch avatar`.
///
/// ```text
/// [Character] path:8001, level:80, rank:6
/// [Talent] 1:6|2:10|3:10|4:10
/// [Equip] id:23000, level:80, rank:5
/// [Relic 1] id:61011, level:15, mainAffix:HPDelta, subAffixes:SpeedDelta-2+2|CriticalChanceBase-3+3
/// ```
///
/// Unknown section labels, fields that do not parse, and relic slots outside
/// 1..=6 are ignored.
pub fn parse_character(text: &str) -> Character {
    let mut character = Character::default();

    for line in text.lines().map(str::trim) {
        let Some(captures) = SECTION.captures(line) else {
            continue;
        };
        let label = captures[1].trim();
        let body = captures[2].trim();

        match label {
            "Character" => {
                for (key, value) in numeric_fields(body) {
                    match key {
                        "path" => character.path_id = Some(value),
                        "level" => character.level = Some(value),
                        "rank" => character.rank = Some(value),
                        _ => {}
                    }
                }
            }
            "Talent" => {
                character.talent.extend(body.split('|').filter_map(|entry| {
                    let (index, level) = split_pair(entry)?;
                    Some((index.parse::<u32>().ok()?, level.parse::<u32>().ok()?))
                }));
            }
            "Equip" => {
                for (key, value) in numeric_fields(body) {
                    match key {
                        "id" => character.equip_id = Some(value),
                        "level" => character.equip_level = Some(value),
                        "rank" => character.equip_rank = Some(value),
                        _ => {}
                    }
                }
            }
            other => {
                if let Some((slot, relic)) = parse_relic_section(other, body) {
                    character.relics.insert(slot, relic);
                }
            }
        }
    }

    character
}

fn numeric_fields(body: &str) -> impl Iterator<Item = (&str, u32)> {
    body.split(',').filter_map(|field| {
        let (key, value) = split_pair(field)?;
        Some((key, value.parse().ok()?))
    })
}

fn parse_relic_section(label: &str, body: &str) -> Option<(RelicSlot, Relic)> {
    let slot = label.strip_prefix("Relic")?.trim().parse().ok()?;
    let slot = RelicSlot::from_index(slot)?;

    let mut relic_id = None;
    let mut relic = Relic::default();
    for field in body.split(',') {
        let Some((key, value)) = split_pair(field) else {
            continue;
        };
        match key {
            "id" => relic_id = value.parse().ok(),
            "level" => relic.level = value.parse().unwrap_or_default(),
            "mainAffix" => relic.main_affix = value.to_string(),
            "subAffixes" => {
                for entry in value.split('|').map(str::trim) {
                    let Some(captures) = SUB_AFFIX.captures(entry) else {
                        continue;
                    };
                    let (Ok(level), Ok(step)) = (captures[2].parse(), captures[3].parse()) else {
                        continue;
                    };
                    relic.sub_affixes.push(captures[1].to_string());
                    relic.sub_affix_levels.push(level);
                    relic.sub_affix_steps.push(step);
                }
            }
            _ => {}
        }
    }

    relic.relic_id = relic_id?;
    Some((slot, relic))
}

/// Renders a character back into the `fetch avatar` section grammar.
///
/// Sections with no recognized fields are omitted, so
/// `parse_character(&render_character(c)) == c` for any parsed character.
pub fn render_character(character: &Character) -> String {
    let mut out = String::new();

    let fields: Vec<String> = [
        ("path", character.path_id),
        ("level", character.level),
        ("rank", character.rank),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| format!("{key}:{v}")))
    .collect();
    if !fields.is_empty() {
        let _ = writeln!(out, "[Character] {}", fields.join(", "));
    }

    if !character.talent.is_empty() {
        let talent: Vec<String> = character
            .talent
            .iter()
            .map(|(index, level)| format!("{index}:{level}"))
            .collect();
        let _ = writeln!(out, "[Talent] {}", talent.join("|"));
    }

    let equip: Vec<String> = [
        ("id", character.equip_id),
        ("level", character.equip_level),
        ("rank", character.equip_rank),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| format!("{key}:{v}")))
    .collect();
    if !equip.is_empty() {
        let _ = writeln!(out, "[Equip] {}", equip.join(", "));
    }

    for (slot, relic) in &character.relics {
        let subs: Vec<String> = relic
            .sub_affixes
            .iter()
            .zip(&relic.sub_affix_levels)
            .enumerate()
            .map(|(i, (name, level))| {
                let step = relic.sub_affix_steps.get(i).copied().unwrap_or(*level);
                format!("{name}-{level}+{step}")
            })
            .collect();
        let _ = writeln!(
            out,
            "[Relic {}] id:{}, level:{}, mainAffix:{}, subAffixes:{}",
            slot.index(),
            relic.relic_id,
            relic.level,
            relic.main_affix,
            subs.join("|")
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[Character] path:8002, level:80, rank:6
[Talent] 1:6|2:10|3:10|4:10|7:1
[Equip] id:23000, level:80, rank:5
[Relic 1] id:61011, level:15, mainAffix:HPDelta, subAffixes:CriticalChanceBase-2+2|CriticalDamageBase-3+3|AttackAddedRatio-2+2|SpeedDelta-2+2
[Relic 2] id:61012, level:15, mainAffix:AttackDelta, subAffixes:CriticalChanceBase-3+3|CriticalDamageBase-2+2|HPAddedRatio-1+1|SpeedDelta-3+3
[Relic 5] id:63015, level:12, mainAffix:FireAddedRatio, subAffixes:AttackAddedRatio-1+1|SpeedDelta-2+2
";

    #[test]
    fn test_parse_all_sections() {
        let character = parse_character(SAMPLE);
        assert_eq!(character.path_id, Some(8002));
        assert_eq!(character.level, Some(80));
        assert_eq!(character.rank, Some(6));
        assert_eq!(character.talent.len(), 5);
        assert_eq!(character.talent[&2], 10);
        assert_eq!(character.equip_id, Some(23000));
        assert_eq!(character.equip_rank, Some(5));
        assert_eq!(character.relics.len(), 3);

        let head = &character.relics[&RelicSlot::Head];
        assert_eq!(head.relic_id, 61011);
        assert_eq!(head.main_affix, "HPDelta");
        assert_eq!(
            head.sub_affixes,
            vec!["CriticalChanceBase", "CriticalDamageBase", "AttackAddedRatio", "SpeedDelta"]
        );
        assert_eq!(head.sub_affix_levels, vec![2, 3, 2, 2]);

        let neck = &character.relics[&RelicSlot::Neck];
        assert_eq!(neck.level, 12);
        assert_eq!(neck.sub_affix_steps, vec![1, 2]);
    }

    #[test]
    fn test_round_trip() {
        let parsed = parse_character(SAMPLE);
        let rendered = render_character(&parsed);
        assert_eq!(parse_character(&rendered), parsed);
    }

    #[test]
    fn test_rendered_text_matches_source_grammar() {
        let first_lines: Vec<&str> = SAMPLE.lines().take(3).collect();
        let rendered = render_character(&parse_character(SAMPLE));
        let rendered_lines: Vec<&str> = rendered.lines().take(3).collect();
        assert_eq!(rendered_lines, first_lines);
    }

    #[test]
    fn test_malformed_lines_are_dropped() {
        let text = "\
Avatar 1001 info:
[Character] path:abc, level:70
[Talent] 1:6|broken|3:x
[Relic 9] id:1, level:15, mainAffix:HPDelta, subAffixes:
[Relic 3] level:15, mainAffix:HPAddedRatio
[Relic 4] id:61014, level:15, mainAffix:SpeedDelta, subAffixes:SpeedDelta-1|HPDelta-2+2
[Lightcone] id:1
";
        let character = parse_character(text);
        assert_eq!(character.path_id, None);
        assert_eq!(character.level, Some(70));
        assert_eq!(character.talent.len(), 1);
        assert_eq!(character.talent[&1], 6);
        // Slot 9 does not exist and slot 3 has no id.
        assert_eq!(character.relics.len(), 1);
        let foot = &character.relics[&RelicSlot::Foot];
        assert_eq!(foot.sub_affixes, vec!["HPDelta"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_character("").is_empty());
        assert!(parse_character("\n\n").is_empty());
    }
}
