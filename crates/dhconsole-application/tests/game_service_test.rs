use async_trait::async_trait;
use dhconsole_application::{
    GameData, GameService, GiveAllKind, MaxAllKind, TextLookup, UnlockAllKind,
};
use dhconsole_core::model::{
    GameEntity, Gender, Language, PlayerInformation, RelicSlot, ServerInformation,
};
use dhconsole_core::{CommandExecutor, ConsoleError, Result, ServerQuery};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Executor that answers from a fixed table and records every command.
#[derive(Default)]
struct MockExecutor {
    responses: HashMap<String, String>,
    rejected: Option<String>,
    commands: Mutex<Vec<String>>,
}

impl MockExecutor {
    fn with(mut self, command: &str, response: &str) -> Self {
        self.responses.insert(command.to_string(), response.to_string());
        self
    }

    fn rejecting(mut self, command: &str) -> Self {
        self.rejected = Some(command.to_string());
        self
    }

    fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, command: &str) -> Result<String> {
        self.commands.lock().unwrap().push(command.to_string());
        if self.rejected.as_deref() == Some(command) {
            return Err(ConsoleError::protocol(1, "Command failed"));
        }
        Ok(self
            .responses
            .get(command)
            .cloned()
            .unwrap_or_else(|| "OK".to_string()))
    }
}

#[async_trait]
impl ServerQuery for MockExecutor {
    async fn server_information(&self) -> Result<ServerInformation> {
        Ok(ServerInformation {
            max_memory: 1024.0,
            ..ServerInformation::default()
        })
    }

    async fn player_information(&self, uid: u32) -> Result<PlayerInformation> {
        Ok(PlayerInformation {
            uid,
            ..PlayerInformation::default()
        })
    }
}

fn service(executor: MockExecutor) -> (GameService<MockExecutor>, Arc<MockExecutor>) {
    let executor = Arc::new(executor);
    (GameService::new(executor.clone()), executor)
}

const CHARACTER: &str = "\
[Character] path:8002, level:80, rank:6
[Talent] 1:6|2:10|3:10|4:10
[Equip] id:23000, level:80, rank:5
[Relic 1] id:61011, level:15, mainAffix:HPDelta, subAffixes:CriticalChanceBase-2+2|CriticalDamageBase-3+3|AttackAddedRatio-2+2|SpeedDelta-2+2
";

const RECOMMEND: &str = "\
[1] 61101 1 8:1 9:3 5:2 7:3
[2] 61102 1 8:1 9:2 5:2 7:4
[3] 61103 4 9:2 5:2 7:4 11:1
[4] 61104 4 8:4 9:2 5:2 11:1
[5] 63115 8 8:1 9:2 5:2 7:4
[6] 63116 4 8:3 9:3 7:2 11:1";

const PROPS: &str = "\
479-300001[20385]: treasure_chest 60301 ChestClosed:12 (ChestLocked:11,ChestClosed:12,ChestUsed:13,Hidden:20)
434-300001[13672]: maze_jigsaw 103012 TriggerEnable:10 (Closed:0,Open:1,TriggerEnable:10,Hidden:20)
not a prop line";

#[tokio::test]
async fn test_owned_characters_are_deduplicated_in_order() {
    let (service, _) = service(MockExecutor::default().with("fetch owned", "1001,8002\n1001,1309"));
    assert_eq!(
        service.get_owned_characters().await.unwrap(),
        vec![1001, 8002, 1309]
    );
}

#[tokio::test]
async fn test_get_character() {
    let (service, executor) = service(MockExecutor::default().with("fetch avatar 8002", CHARACTER));
    let character = service.get_character(8002).await.unwrap();

    assert_eq!(character.level, Some(80));
    assert_eq!(character.equip_id, Some(23000));
    assert_eq!(character.relics[&RelicSlot::Head].sub_affix_levels, vec![2, 3, 2, 2]);
    assert_eq!(executor.commands(), vec!["fetch avatar 8002"]);
}

#[tokio::test]
async fn test_basic_info_is_three_commands() {
    let (service, executor) = service(MockExecutor::default());
    service.set_character_basic_info(1001, 80, 6, 10).await.unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "avatar level 1001 80",
            "avatar rank 1001 6",
            "avatar talent 1001 10"
        ]
    );
}

#[tokio::test]
async fn test_basic_info_reports_partial_application() {
    let (service, executor) = service(MockExecutor::default().rejecting("avatar rank 1001 6"));
    let err = service
        .set_character_basic_info(1001, 80, 6, 10)
        .await
        .unwrap_err();

    match &err {
        ConsoleError::PartiallyApplied { completed, total, source } => {
            assert_eq!(*completed, 1);
            assert_eq!(*total, 3);
            assert!(source.is_protocol());
        }
        other => panic!("Expected PartiallyApplied, got {other:?}"),
    }
    assert!(err.is_partial());
    assert_eq!(executor.commands().len(), 2);
}

#[tokio::test]
async fn test_equip_command() {
    let (service, executor) = service(MockExecutor::default());
    service.set_character_equip(1001, 23000, 80, 5).await.unwrap();
    assert_eq!(executor.commands(), vec!["equip item 1001 23000 l80 r5"]);
}

#[tokio::test]
async fn test_recommended_relics_apply_in_slot_order() {
    let (service, executor) = service(MockExecutor::default().with("build recommend 1001", RECOMMEND));
    let relics = service.get_relic_recommend(1001).await.unwrap();
    assert_eq!(relics.len(), 6);

    service.set_character_relics(1001, &relics).await.unwrap();

    let commands = executor.commands();
    assert_eq!(commands.len(), 7);
    assert_eq!(commands[1], "equip relic 1001 61101 l15 1 8:1 9:3 5:2 7:3");
    assert_eq!(commands[3], "equip relic 1001 61103 l15 4 9:2 5:2 7:4 11:1");
    assert_eq!(commands[6], "equip relic 1001 63116 l15 4 8:3 9:3 7:2 11:1");
}

#[tokio::test]
async fn test_invalid_relic_set_sends_nothing() {
    let (service, executor) = service(MockExecutor::default().with("build recommend 1001", RECOMMEND));
    let mut relics = service.get_relic_recommend(1001).await.unwrap();
    relics.get_mut(&RelicSlot::Object).unwrap().sub_affix_levels = vec![6, 6, 6, 6];

    let err = service.set_character_relics(1001, &relics).await.unwrap_err();
    assert!(matches!(err, ConsoleError::InvalidArgument(_)));
    assert_eq!(executor.commands(), vec!["build recommend 1001"]);
}

#[tokio::test]
async fn test_player_info() {
    let (service, _) = service(MockExecutor::default().with("fetch player", "Player: level: 70, gender: 2"));
    let info = service.get_player_info().await.unwrap();
    assert_eq!(info.level, 70);
    assert_eq!(Gender::from_id(info.gender), Some(Gender::Female));
}

#[tokio::test]
async fn test_player_info_unexpected_shape() {
    let (service, _) = service(MockExecutor::default().with("fetch player", "Player not online"));
    let err = service.get_player_info().await.unwrap_err();
    assert!(matches!(err, ConsoleError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_player_level_is_range_checked() {
    let (service, executor) = service(MockExecutor::default());
    assert!(service.set_player_level(0).await.is_err());
    assert!(service.set_player_level(81).await.is_err());
    service.set_player_level(80).await.unwrap();
    service.set_player_gender(Gender::Male).await.unwrap();

    assert_eq!(executor.commands(), vec!["setlevel 80", "hero gender 1"]);
}

#[tokio::test]
async fn test_account_bulk_commands() {
    let (service, executor) = service(MockExecutor::default());
    service.give_all(GiveAllKind::Furniture).await.unwrap();
    service.max_all(MaxAllKind::CharacterTalent).await.unwrap();
    service.unlock_all(UnlockAllKind::Rogue).await.unwrap();
    service.remove_unused_relics().await.unwrap();
    service.remove_unused_equipment().await.unwrap();

    assert_eq!(
        executor.commands(),
        vec![
            "giveall train",
            "avatar talent -1 10",
            "unlockall rogue",
            "remove relics",
            "remove equipment"
        ]
    );
}

#[tokio::test]
async fn test_inventory_and_give() {
    let (service, executor) =
        service(MockExecutor::default().with("fetch inventory", "1:12000\n2:300 (locked)\n\n"));
    let inventory = service.get_inventory().await.unwrap();
    assert_eq!(inventory[&1], 12000);
    assert_eq!(inventory[&2], 300);

    assert!(service.give_item(1, 0).await.is_err());
    service.give_item(1, 10).await.unwrap();
    assert_eq!(executor.commands(), vec!["fetch inventory", "give 1 x10"]);
}

#[tokio::test]
async fn test_missions() {
    let listing = "Running missions:\nMain task 1000101:\n  100010101、100010102\nPossibly stuck tasks:\n  1";
    let (service, executor) = service(MockExecutor::default().with("mission running", listing));
    let missions = service.get_current_missions().await.unwrap();
    assert_eq!(missions[&1000101], vec![100010101, 100010102]);

    service.finish_main_mission(1000101).await.unwrap();
    service.finish_sub_mission(100010101).await.unwrap();
    service.accept_main_mission(1000101).await.unwrap();
    assert_eq!(
        executor.commands()[1..],
        [
            "mission finishmain 1000101",
            "mission finish 100010101",
            "mission reaccept 1000101"
        ]
    );
}

#[tokio::test]
async fn test_props_sorted_and_state_checked() {
    let (service, executor) = service(MockExecutor::default().with("fetch props", PROPS));
    let props = service.get_props_near_me().await.unwrap();

    assert_eq!(props.len(), 2);
    assert_eq!(props[0].distance, 13672);
    assert_eq!(props[1].prop_type, "treasure_chest");

    let err = service.change_prop_state(&props[0], 12).await.unwrap_err();
    assert!(matches!(err, ConsoleError::InvalidArgument(_)));

    service.change_prop_state(&props[0], 1).await.unwrap();
    assert_eq!(executor.commands(), vec!["fetch props", "scene prop 434 300001 1"]);
}

#[tokio::test]
async fn test_server_queries_bypass_commands() {
    let (service, executor) = service(MockExecutor::default());
    assert_eq!(service.server_information().await.unwrap().max_memory, 1024.0);
    assert_eq!(service.player_information(10001).await.unwrap().uid, 10001);
    assert!(executor.commands().is_empty());
}

#[tokio::test]
async fn test_game_data_loads_once_per_language() {
    let (service, executor) = service(
        MockExecutor::default()
            .with("gametext avatar #JP", "1001:三月なのか\n8002:<unbreak>開拓者</unbreak>")
            .with("gametext avatar #EN", "1001:March 7th"),
    );
    let data = GameData::new();

    data.load(&service, GameEntity::Avatar, Language::Japanese).await.unwrap();
    data.load(&service, GameEntity::Avatar, Language::Japanese).await.unwrap();
    assert_eq!(executor.commands(), vec!["gametext avatar #JP"]);

    assert_eq!(
        data.get(8002, Language::Japanese).await,
        TextLookup::Found("開拓者".into())
    );
    assert_eq!(data.get(8002, Language::English).await, TextLookup::NotLoaded);

    data.load(&service, GameEntity::Avatar, Language::English).await.unwrap();
    assert_eq!(data.get(8002, Language::English).await, TextLookup::Missing);
    assert_eq!(
        data.get(1001, Language::English).await,
        TextLookup::Found("March 7th".into())
    );
}

#[tokio::test]
async fn test_relic_type_index() {
    let (service, executor) =
        service(MockExecutor::default().with("gametext relic", "61011:1\n61012:2\n61021:1\n"));
    let data = GameData::new();

    data.load_relic_types(&service).await.unwrap();
    data.load_relic_types(&service).await.unwrap();

    assert_eq!(data.relics_of_type(1).await, vec![61011, 61021]);
    assert_eq!(data.relics_of_type(2).await, vec![61012]);
    assert!(data.relics_of_type(9).await.is_empty());
    assert_eq!(executor.commands().len(), 1);
}
