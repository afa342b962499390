use crate::core::error::CharacterError;
use crate::engine::rules;
use crate::models::api::{CharacterSummary, CharacterView};
use crate::models::character::{Character, Zone, Zones};
use crate::models::document::Document;
use crate::models::user::User;
use crate::stores::document_store::DocumentStore;
use anyhow::anyhow;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fields of a character about to be created
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub name: String,
    pub game_id: u64,
    pub class_id: u64,
    pub level: u32,
}

/// Authorized, persisted operations on characters and their zones
///
/// Every mutation is one [`DocumentStore::transaction`]: it either applies
/// fully and is saved, or fails and leaves the document untouched.
pub struct CharacterEngine {
    store: Arc<DocumentStore>,
}

impl CharacterEngine {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Characters visible to `actor`: their own, or all of them for an admin
    pub fn list(&self, actor: &User) -> Result<Vec<CharacterSummary>, CharacterError> {
        let characters = self.store.read(|doc| {
            doc.characters
                .iter()
                .filter(|character| actor.is_admin() || character.is_owned_by(&actor.username))
                .map(CharacterSummary::from)
                .collect()
        })?;

        Ok(characters)
    }

    pub fn create(&self, actor: &User, new: NewCharacter) -> Result<CharacterSummary, CharacterError> {
        if new.name.trim().is_empty() {
            return Err(CharacterError::InvalidInput("name is required".to_string()));
        }

        let summary = self.store.transaction(|doc| -> Result<CharacterSummary, CharacterError> {
            let class_matches_game = doc.game(new.game_id).is_some()
                && doc.class(new.class_id).is_some_and(|class| class.game_id == new.game_id);
            if !class_matches_game {
                return Err(CharacterError::InvalidGameOrClass);
            }

            let character = Character {
                id: doc.allocate_character_id(),
                username: actor.username.clone(),
                name: new.name.clone(),
                game_id: new.game_id,
                class_id: new.class_id,
                level: new.level,
                zones: Zones::default(),
            };
            let summary = CharacterSummary::from(&character);
            doc.characters.push(character);

            Ok(summary)
        })?;

        info!(
            character_id = summary.id,
            username = %actor.username,
            class_id = summary.class_id,
            level = summary.level,
            "Character created"
        );

        Ok(summary)
    }

    /// Denormalized read of one character
    pub fn view(&self, character_id: u64, actor: &User) -> Result<CharacterView, CharacterError> {
        let document = self.store.load()?;
        let character = authorize(&document, character_id, actor)?;
        let class = document
            .class(character.class_id)
            .ok_or_else(|| anyhow!("class {} of character {} is missing", character.class_id, character_id))?;

        Ok(rules::project(character, class, &document.cards))
    }

    /// Replace the hand and clear the other zones.
    /// Allowed at any time; a re-draft always starts play over.
    pub fn commit_hand(&self, character_id: u64, actor: &User, card_ids: Vec<u64>) -> Result<(), CharacterError> {
        let hand_len = card_ids.len();

        self.store.transaction(|doc| -> Result<(), CharacterError> {
            let character = authorize(doc, character_id, actor)?;
            let class = doc
                .class(character.class_id)
                .ok_or_else(|| anyhow!("class {} of character {} is missing", character.class_id, character_id))?;

            rules::validate_hand(class, character.level, &doc.cards, &card_ids)?;

            character_mut(doc, character_id)?.zones.reset_with_hand(card_ids);
            Ok(())
        })?;

        info!(character_id, username = %actor.username, cards = hand_len, "Hand committed");
        Ok(())
    }

    pub fn move_card(
        &self,
        character_id: u64,
        actor: &User,
        card_id: u64,
        from: Zone,
        to: Zone,
    ) -> Result<(), CharacterError> {
        if from == to {
            // Still authorized, but nothing to write
            let document = self.store.load()?;
            authorize(&document, character_id, actor)?;
            return Ok(());
        }

        self.store.transaction(|doc| -> Result<(), CharacterError> {
            authorize(doc, character_id, actor)?;
            let character = character_mut(doc, character_id)?;
            rules::move_card(&mut character.zones, card_id, from, to)
        })?;

        info!(character_id, card_id, from = %from, to = %to, "Card moved");
        Ok(())
    }

    /// Returns the counter after clamping
    pub fn adjust_counter(&self, character_id: u64, actor: &User, card_id: u64, delta: i64) -> Result<u64, CharacterError> {
        let counter = self.store.transaction(|doc| -> Result<u64, CharacterError> {
            authorize(doc, character_id, actor)?;
            let character = character_mut(doc, character_id)?;
            rules::adjust_counter(&mut character.zones, card_id, delta)
        })?;

        debug!(character_id, card_id, delta, counter, "Counter adjusted");
        Ok(counter)
    }
}

/// Owner or admin may touch a character; anyone else gets `Forbidden`
fn authorize<'a>(doc: &'a Document, character_id: u64, actor: &User) -> Result<&'a Character, CharacterError> {
    let character = doc.character(character_id).ok_or(CharacterError::NotFound)?;

    if actor.is_admin() || character.is_owned_by(&actor.username) {
        Ok(character)
    } else {
        warn!(
            character_id,
            username = %actor.username,
            owner = %character.username,
            "Access to another user's character denied"
        );
        Err(CharacterError::Forbidden)
    }
}

fn character_mut(doc: &mut Document, character_id: u64) -> Result<&mut Character, CharacterError> {
    doc.character_mut(character_id).ok_or(CharacterError::NotFound)
}
