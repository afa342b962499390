use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u64,
    pub name: String,
}

/// Per-game archetype. `hand_size` is fixed for the class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: u64,
    pub game_id: u64,
    pub name: String,
    pub hand_size: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u64,
    pub class_id: u64,
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub image: String,
}

impl Card {
    /// Whether a character of `class_id` at `level` may carry this card
    pub fn eligible_for(&self, class_id: u64, level: u32) -> bool {
        self.class_id == class_id && self.level <= level
    }
}
