use crate::model::PlayerInfo;
use once_cell::sync::Lazy;
use regex::Regex;

static PLAYER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"level: (\d+), gender: (\d+)").expect("player pattern"));

/// Extracts level and gender from the `fetch player` response.
pub fn parse_player_info(text: &str) -> Option<PlayerInfo> {
    let captures = PLAYER.captures(text)?;
    Some(PlayerInfo {
        level: captures[1].parse().ok()?,
        gender: captures[2].parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_info() {
        let info = parse_player_info("Player 10001\nlevel: 70, gender: 2\n").unwrap();
        assert_eq!(info, PlayerInfo { level: 70, gender: 2 });
    }

    #[test]
    fn test_parse_player_info_mismatch() {
        assert!(parse_player_info("level 70 gender 2").is_none());
    }
}
