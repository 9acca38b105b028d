use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Player trailblazer gender as used by `hero gender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male = 1,
    Female = 2,
}

impl Gender {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Result of `fetch player`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub level: u32,
    pub gender: u32,
}

/// A player currently connected to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlinePlayer {
    pub uid: u32,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Payload of the `server_information` query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerInformation {
    pub online_players: Vec<OnlinePlayer>,
    /// Unix seconds.
    pub server_time: i64,
    /// Megabytes.
    pub max_memory: f64,
    pub used_memory: f64,
    pub program_used_memory: f64,
}

/// Payload of the `player_information` query.
///
/// Only the fields the console reads are typed; everything else is kept in
/// `extra` so newer server builds do not break deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInformation {
    pub uid: u32,
    pub name: String,
    pub signature: String,
    pub head_icon_id: u32,
    pub cur_floor_id: u32,
    pub cur_map_entry_id: u32,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
