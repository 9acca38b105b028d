//! Domain records produced by the response parsers.

pub mod affix;
pub mod character;
pub mod game_text;
pub mod player;
pub mod prop;

use std::collections::BTreeMap;

pub use affix::{RelicSlot, SUB_AFFIXES};
pub use character::{Character, Relic};
pub use game_text::{GameEntity, Language};
pub use player::{Gender, OnlinePlayer, PlayerInfo, PlayerInformation, ServerInformation};
pub use prop::{Prop, PropKey};

/// Running main mission id → its open sub mission ids, in listing order.
pub type MissionTree = BTreeMap<u32, Vec<u32>>;
