use crate::models::catalog::{Card, Class, Game};
use crate::models::character::Character;
use crate::models::user::User;
use serde::{Deserialize, Serialize};

/// Monotonic id counters, one per entity kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextIds {
    pub game_id: u64,
    pub class_id: u64,
    pub card_id: u64,
    pub character_id: u64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            game_id: 1,
            class_id: 1,
            card_id: 1,
            character_id: 1,
        }
    }
}

/// The whole persisted state: identities, catalog and characters
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub next_ids: NextIds,
}

impl Document {
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.username == username)
    }

    pub fn game(&self, id: u64) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn class(&self, id: u64) -> Option<&Class> {
        self.classes.iter().find(|class| class.id == id)
    }

    /// Classes, optionally restricted to one game
    pub fn classes_for_game(&self, game_id: Option<u64>) -> Vec<Class> {
        self.classes
            .iter()
            .filter(|class| game_id.map_or(true, |id| class.game_id == id))
            .cloned()
            .collect()
    }

    /// Cards filtered by class and by a maximum level
    pub fn cards_filtered(&self, class_id: Option<u64>, max_level: Option<u32>) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| class_id.map_or(true, |id| card.class_id == id))
            .filter(|card| max_level.map_or(true, |level| card.level <= level))
            .cloned()
            .collect()
    }

    pub fn character(&self, id: u64) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    pub fn character_mut(&mut self, id: u64) -> Option<&mut Character> {
        self.characters.iter_mut().find(|character| character.id == id)
    }

    pub fn allocate_character_id(&mut self) -> u64 {
        let id = self.next_ids.character_id;
        self.next_ids.character_id += 1;
        id
    }
}
