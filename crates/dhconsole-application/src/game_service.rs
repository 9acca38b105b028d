//! GameService - one call per game operation.
//!
//! Each method formats the command text the server expects, runs it through a
//! [`CommandExecutor`] and parses the reply. Operations that need several
//! commands send them in order and do not roll back on failure; see
//! [`ConsoleError::PartiallyApplied`].

use dhconsole_core::model::affix::sub_affix_index;
use dhconsole_core::model::{
    Character, GameEntity, Gender, Language, MissionTree, PlayerInfo, PlayerInformation, Prop,
    Relic, RelicSlot, ServerInformation,
};
use dhconsole_core::parser;
use dhconsole_core::{CommandExecutor, ConsoleError, Result, ServerQuery};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

pub const MIN_PLAYER_LEVEL: u32 = 1;
pub const MAX_PLAYER_LEVEL: u32 = 80;

/// Bulk grants of `giveall`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveAllKind {
    Characters,
    Collectibles,
    Furniture,
    Pets,
}

impl GiveAllKind {
    fn command(self) -> &'static str {
        match self {
            Self::Characters => "giveall avatar",
            Self::Collectibles => "giveall unlock",
            Self::Furniture => "giveall train",
            Self::Pets => "giveall pet",
        }
    }
}

/// Account-wide maximization, applied to every owned character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAllKind {
    CharacterLevel,
    CharacterRank,
    CharacterTalent,
}

impl MaxAllKind {
    fn command(self) -> &'static str {
        match self {
            Self::CharacterLevel => "avatar level -1 80",
            Self::CharacterRank => "avatar rank -1 6",
            Self::CharacterTalent => "avatar talent -1 10",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockAllKind {
    Mission,
    Tutorial,
    Rogue,
}

impl UnlockAllKind {
    fn command(self) -> &'static str {
        match self {
            Self::Mission => "unlockall mission",
            Self::Tutorial => "unlockall tutorial",
            Self::Rogue => "unlockall rogue",
        }
    }
}

pub struct GameService<E: CommandExecutor> {
    executor: Arc<E>,
}

impl<E: CommandExecutor> Clone for GameService<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

impl<E: CommandExecutor> GameService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    /// Sends `command` verbatim and returns the raw response text.
    pub async fn execute(&self, command: &str) -> Result<String> {
        self.executor.execute(command).await
    }

    /// Sends each command in order, stopping at the first failure.
    async fn execute_steps(&self, commands: &[String]) -> Result<Vec<String>> {
        let total = commands.len();
        let mut outputs = Vec::with_capacity(total);
        for (completed, command) in commands.iter().enumerate() {
            match self.executor.execute(command).await {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    warn!(completed, total, command = %command, "Multi-step operation stopped");
                    return Err(ConsoleError::partially_applied(completed, total, err));
                }
            }
        }
        Ok(outputs)
    }

    // ------------------------------------------------------------------
    // Game text
    // ------------------------------------------------------------------

    /// Fetches the id → display name table of `kind` in `language`.
    pub async fn load_game_text(
        &self,
        kind: GameEntity,
        language: Language,
    ) -> Result<BTreeMap<u32, String>> {
        let command = format!("gametext {} #{}", kind.command_name(), language.server_code());
        let text = self.executor.execute(&command).await?;
        let table = parser::parse_game_text(&text);
        warn_if_unparsed(&command, &text, table.is_empty());
        debug!(%kind, language = language.locale(), entries = table.len(), "Loaded game text");
        Ok(table)
    }

    /// Fetches relic id → relic type.
    pub async fn load_relic_types(&self) -> Result<BTreeMap<u32, u32>> {
        let command = "gametext relic";
        let text = self.executor.execute(command).await?;
        let table = parser::parse_item_list(&text);
        warn_if_unparsed(command, &text, table.is_empty());
        Ok(table)
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    /// Item id → count.
    pub async fn get_inventory(&self) -> Result<BTreeMap<u32, u32>> {
        let command = "fetch inventory";
        let text = self.executor.execute(command).await?;
        let items = parser::parse_item_list(&text);
        warn_if_unparsed(command, &text, items.is_empty());
        Ok(items)
    }

    pub async fn give_item(&self, item_id: u32, count: u32) -> Result<String> {
        if count == 0 {
            return Err(ConsoleError::invalid_argument("item count must be at least 1"));
        }
        self.executor
            .execute(&format!("give {item_id} x{count}"))
            .await
    }

    // ------------------------------------------------------------------
    // Characters
    // ------------------------------------------------------------------

    /// Owned character ids in listing order, without duplicates.
    pub async fn get_owned_characters(&self) -> Result<Vec<u32>> {
        let command = "fetch owned";
        let text = self.executor.execute(command).await?;
        let mut ids = parser::parse_id_list(&text);
        let mut seen = HashSet::new();
        ids.retain(|id| seen.insert(*id));
        warn_if_unparsed(command, &text, ids.is_empty());
        Ok(ids)
    }

    pub async fn get_character(&self, character_id: u32) -> Result<Character> {
        let command = format!("fetch avatar {character_id}");
        let text = self.executor.execute(&command).await?;
        let character = parser::parse_character(&text);
        warn_if_unparsed(&command, &text, character.is_empty());
        Ok(character)
    }

    pub async fn set_avatar_level(&self, character_id: u32, level: u32) -> Result<String> {
        self.executor
            .execute(&format!("avatar level {character_id} {level}"))
            .await
    }

    /// Sets level, rank and talent level with three commands.
    pub async fn set_character_basic_info(
        &self,
        character_id: u32,
        level: u32,
        rank: u32,
        talent: u32,
    ) -> Result<()> {
        let commands = [
            format!("avatar level {character_id} {level}"),
            format!("avatar rank {character_id} {rank}"),
            format!("avatar talent {character_id} {talent}"),
        ];
        self.execute_steps(&commands).await.map(|_| ())
    }

    pub async fn set_character_equip(
        &self,
        character_id: u32,
        equip_id: u32,
        equip_level: u32,
        equip_rank: u32,
    ) -> Result<String> {
        self.executor
            .execute(&format!(
                "equip item {character_id} {equip_id} l{equip_level} r{equip_rank}"
            ))
            .await
    }

    /// Validates and equips one relic.
    pub async fn set_character_relic(
        &self,
        character_id: u32,
        slot: RelicSlot,
        relic: &Relic,
    ) -> Result<String> {
        let command = relic_command(character_id, slot, relic)?;
        self.executor.execute(&command).await
    }

    /// Equips a relic set, one command per slot in slot order.
    ///
    /// Every relic is validated before the first command is sent.
    pub async fn set_character_relics(
        &self,
        character_id: u32,
        relics: &BTreeMap<RelicSlot, Relic>,
    ) -> Result<()> {
        let commands = relics
            .iter()
            .map(|(slot, relic)| relic_command(character_id, *slot, relic))
            .collect::<Result<Vec<_>>>()?;
        self.execute_steps(&commands).await.map(|_| ())
    }

    /// Recommended relic build for a character, keyed by slot.
    pub async fn get_relic_recommend(
        &self,
        character_id: u32,
    ) -> Result<BTreeMap<RelicSlot, Relic>> {
        let command = format!("build recommend {character_id}");
        let text = self.executor.execute(&command).await?;
        let relics = parser::parse_relic_recommend(&text);
        warn_if_unparsed(&command, &text, relics.is_empty());
        Ok(relics)
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    pub async fn get_player_info(&self) -> Result<PlayerInfo> {
        let text = self.executor.execute("fetch player").await?;
        parser::parse_player_info(&text).ok_or_else(|| {
            ConsoleError::unexpected_response(format!("Failed to parse player info: {text:?}"))
        })
    }

    pub async fn set_player_level(&self, level: u32) -> Result<String> {
        if !(MIN_PLAYER_LEVEL..=MAX_PLAYER_LEVEL).contains(&level) {
            return Err(ConsoleError::invalid_argument(format!(
                "player level must be within {MIN_PLAYER_LEVEL}..={MAX_PLAYER_LEVEL}, got {level}"
            )));
        }
        self.executor.execute(&format!("setlevel {level}")).await
    }

    pub async fn set_player_gender(&self, gender: Gender) -> Result<String> {
        self.executor
            .execute(&format!("hero gender {}", gender.id()))
            .await
    }

    pub async fn give_all(&self, kind: GiveAllKind) -> Result<String> {
        self.executor.execute(kind.command()).await
    }

    pub async fn max_all(&self, kind: MaxAllKind) -> Result<String> {
        self.executor.execute(kind.command()).await
    }

    pub async fn unlock_all(&self, kind: UnlockAllKind) -> Result<String> {
        self.executor.execute(kind.command()).await
    }

    pub async fn remove_unused_relics(&self) -> Result<String> {
        self.executor.execute("remove relics").await
    }

    pub async fn remove_unused_equipment(&self) -> Result<String> {
        self.executor.execute("remove equipment").await
    }

    // ------------------------------------------------------------------
    // Missions
    // ------------------------------------------------------------------

    pub async fn get_current_missions(&self) -> Result<MissionTree> {
        let command = "mission running";
        let text = self.executor.execute(command).await?;
        let missions = parser::parse_mission_tree(&text);
        // The header line alone means no running missions
        warn_if_unparsed(command, &text, missions.is_empty() && text.trim().lines().count() > 1);
        Ok(missions)
    }

    pub async fn finish_main_mission(&self, main_mission_id: u32) -> Result<String> {
        self.executor
            .execute(&format!("mission finishmain {main_mission_id}"))
            .await
    }

    pub async fn finish_sub_mission(&self, sub_mission_id: u32) -> Result<String> {
        self.executor
            .execute(&format!("mission finish {sub_mission_id}"))
            .await
    }

    pub async fn accept_main_mission(&self, main_mission_id: u32) -> Result<String> {
        self.executor
            .execute(&format!("mission reaccept {main_mission_id}"))
            .await
    }

    // ------------------------------------------------------------------
    // Scene
    // ------------------------------------------------------------------

    /// Props around the player, nearest first.
    pub async fn get_props_near_me(&self) -> Result<Vec<Prop>> {
        let command = "fetch props";
        let text = self.executor.execute(command).await?;
        let mut props = parser::parse_prop_list(&text);
        props.sort_by_key(|prop| prop.distance);
        warn_if_unparsed(command, &text, props.is_empty());
        Ok(props)
    }

    /// Switches a prop to one of its listed states.
    pub async fn change_prop_state(&self, prop: &Prop, state_id: u32) -> Result<String> {
        if !prop.accepts_state(state_id) {
            return Err(ConsoleError::invalid_argument(format!(
                "state {state_id} is not valid for prop {}",
                prop.key()
            )));
        }
        self.executor
            .execute(&format!(
                "scene prop {} {} {state_id}",
                prop.group_id, prop.entity_id
            ))
            .await
    }
}

impl<E: CommandExecutor + ServerQuery> GameService<E> {
    pub async fn server_information(&self) -> Result<ServerInformation> {
        self.executor.server_information().await
    }

    pub async fn player_information(&self, uid: u32) -> Result<PlayerInformation> {
        self.executor.player_information(uid).await
    }
}

/// `equip relic {character} {relic} l{level} {main} {sub:count}...` with
/// 1-based affix indices.
fn relic_command(character_id: u32, slot: RelicSlot, relic: &Relic) -> Result<String> {
    relic.validate(slot)?;

    let main_index = slot.main_affix_index(&relic.main_affix).ok_or_else(|| {
        ConsoleError::invalid_argument(format!("unknown main affix '{}'", relic.main_affix))
    })?;

    let mut tokens = vec![
        "equip relic".to_string(),
        character_id.to_string(),
        relic.relic_id.to_string(),
        format!("l{}", relic.level),
        main_index.to_string(),
    ];
    for (name, count) in relic.sub_affixes.iter().zip(&relic.sub_affix_levels) {
        let index = sub_affix_index(name)
            .ok_or_else(|| ConsoleError::invalid_argument(format!("unknown sub affix '{name}'")))?;
        tokens.push(format!("{index}:{count}"));
    }
    Ok(tokens.join(" "))
}

/// An empty parse of non-empty text usually means the server changed format.
fn warn_if_unparsed(command: &str, text: &str, parsed_empty: bool) {
    if parsed_empty && !text.trim().is_empty() {
        warn!(command, response_len = text.len(), "Response did not match the expected format");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relic() -> Relic {
        Relic {
            relic_id: 61011,
            level: 15,
            main_affix: RelicSlot::Head.main_affixes()[0].to_string(),
            sub_affixes: vec![
                dhconsole_core::model::SUB_AFFIXES[7].to_string(),
                dhconsole_core::model::SUB_AFFIXES[8].to_string(),
            ],
            sub_affix_levels: vec![4, 5],
            sub_affix_steps: vec![4, 5],
        }
    }

    #[test]
    fn test_relic_command_uses_one_based_indices() {
        let command = relic_command(1001, RelicSlot::Head, &relic()).unwrap();
        assert_eq!(command, "equip relic 1001 61011 l15 1 8:4 9:5");
    }

    #[test]
    fn test_relic_command_rejects_invalid_relic() {
        let mut bad = relic();
        bad.sub_affix_levels = vec![1, 1];
        assert!(relic_command(1001, RelicSlot::Head, &bad).is_err());
    }
}
