use super::{match_lines, split_pair};
use std::collections::BTreeMap;

/// Parses `id:name` lines (as returned by `gametext`) into an id → name table.
///
/// Only the first colon separates; names may contain further colons.
pub fn parse_game_text(text: &str) -> BTreeMap<u32, String> {
    match_lines(text, |line| {
        let (id, name) = split_pair(line)?;
        if name.is_empty() {
            return None;
        }
        Some((id.parse().ok()?, name.to_string()))
    })
    .collect()
}

/// Parses `id:count` lines (inventory, relic types) into an id → count table.
pub fn parse_item_list(text: &str) -> BTreeMap<u32, u32> {
    match_lines(text, |line| {
        let (id, count) = split_pair(line)?;
        Some((id.parse().ok()?, leading_number(count)?))
    })
    .collect()
}

/// Parses a comma- or newline-separated list of ids, keeping server order.
pub fn parse_id_list(text: &str) -> Vec<u32> {
    text.split([',', '\n'])
        .filter_map(|token| token.trim().parse().ok())
        .collect()
}

fn leading_number(value: &str) -> Option<u32> {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
