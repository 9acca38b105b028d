use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scene object near the player, as listed by `fetch props`.
///
/// `group_id` + `entity_id` identify the prop; distance and state are live
/// values that change between fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prop {
    pub group_id: u32,
    pub entity_id: u32,
    pub prop_id: u32,
    /// Fixed-point distance from the player, in millimeters.
    pub distance: u32,
    #[serde(rename = "type")]
    pub prop_type: String,
    /// Not present in the current listing format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub state: String,
    pub state_id: u32,
    /// State label → state id.
    pub valid_states: BTreeMap<String, u32>,
}

/// Stable identity of a prop across fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropKey {
    pub group_id: u32,
    pub entity_id: u32,
}

impl std::fmt::Display for PropKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.group_id, self.entity_id)
    }
}

impl Prop {
    pub fn key(&self) -> PropKey {
        PropKey {
            group_id: self.group_id,
            entity_id: self.entity_id,
        }
    }

    pub fn distance_meters(&self) -> f64 {
        f64::from(self.distance) / 1000.0
    }

    pub fn accepts_state(&self, state_id: u32) -> bool {
        self.valid_states.values().any(|id| *id == state_id)
    }

    /// Label for a state id, if the prop lists it.
    pub fn state_label(&self, state_id: u32) -> Option<&str> {
        self.valid_states
            .iter()
            .find(|(_, id)| **id == state_id)
            .map(|(label, _)| label.as_str())
    }
}
