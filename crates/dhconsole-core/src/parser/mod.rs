//! Parsers for the server's line-oriented command responses.
//!
//! Every parser is a pure function from response text to a typed value. A line
//! that does not match the expected shape is skipped, never fatal, so a parser
//! always returns whatever structure it could recognize.

mod character;
mod key_value;
mod mission;
mod player;
mod prop;
mod relic_recommend;

pub use character::{parse_character, render_character};
pub use key_value::{parse_game_text, parse_id_list, parse_item_list};
pub use mission::{MISSION_ID_DELIMITERS, parse_mission_tree};
pub use player::parse_player_info;
pub use prop::parse_prop_list;
pub use relic_recommend::{RECOMMENDED_RELIC_LEVEL, parse_relic_recommend};

/// Applies `matcher` to every non-blank line and keeps the matches.
pub(crate) fn match_lines<'a, T>(
    text: &'a str,
    matcher: impl FnMut(&'a str) -> Option<T>,
) -> impl Iterator<Item = T> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(matcher)
}

/// Splits `key:value` on the first colon and trims both halves.
pub(crate) fn split_pair(field: &str) -> Option<(&str, &str)> {
    let (key, value) = field.split_once(':')?;
    Some((key.trim(), value.trim()))
}
