use super::{match_lines, split_pair};
use crate::model::Prop;
use once_cell::sync::Lazy;
use regex::Regex;

// group-entity[distance]: type propId label:stateId (label:id,label:id,...)
static PROP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d+)-(\d+)\[(\d+)\]:\s*(\S+)\s+(\d+)\s+([^\s:()]+):(\d+)(?:\s*\(([^)]*)\))?",
    )
    .expect("prop line pattern")
});

/// Parses the nearby prop listing, one prop per line, in server order.
pub fn parse_prop_list(text: &str) -> Vec<Prop> {
    match_lines(text, |line| {
        let captures = PROP_LINE.captures(line)?;
        let valid_states = captures
            .get(8)
            .map(|states| {
                states
                    .as_str()
                    .split(',')
                    .filter_map(|entry| {
                        let (label, id) = split_pair(entry)?;
                        if label.is_empty() {
                            return None;
                        }
                        Some((label.to_string(), id.parse().ok()?))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Prop {
            group_id: captures[1].parse().ok()?,
            entity_id: captures[2].parse().ok()?,
            distance: captures[3].parse().ok()?,
            prop_type: captures[4].to_string(),
            prop_id: captures[5].parse().ok()?,
            category: None,
            state: captures[6].to_string(),
            state_id: captures[7].parse().ok()?,
            valid_states,
        })
    })
    .collect()
}
