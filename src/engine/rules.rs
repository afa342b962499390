// Zone rules that operate on in-memory state only

use crate::core::error::CharacterError;
use crate::models::api::{CardView, CharacterView, ZonesView};
use crate::models::catalog::{Card, Class};
use crate::models::character::{ActiveCard, Character, Zone, Zones};
use serde_json::Value;

/// Check a proposed hand against the class hand size and the eligible cards.
///
/// Size is checked before membership. Duplicate ids are accepted as long as
/// each one names an eligible card.
pub fn validate_hand(class: &Class, level: u32, catalog: &[Card], card_ids: &[u64]) -> Result<(), CharacterError> {
    if card_ids.len() != class.hand_size {
        return Err(CharacterError::InvalidHandSize {
            expected: class.hand_size,
            actual: card_ids.len(),
        });
    }

    for &card_id in card_ids {
        let eligible = catalog
            .iter()
            .any(|card| card.id == card_id && card.eligible_for(class.id, level));

        if !eligible {
            return Err(CharacterError::InvalidCardSelection { card_id });
        }
    }

    Ok(())
}

/// Move one card between zones.
///
/// Any pair of zones is allowed; the only requirement is that the card is
/// present in `from`. On failure the zones are untouched.
pub fn move_card(zones: &mut Zones, card_id: u64, from: Zone, to: Zone) -> Result<(), CharacterError> {
    if from == to {
        return Ok(());
    }

    if !zones.remove(from, card_id) {
        return Err(CharacterError::CardNotInZone { card_id, zone: from });
    }
    zones.push(to, card_id);

    Ok(())
}

/// Add `delta` to an active card's counter, flooring at zero
pub fn adjust_counter(zones: &mut Zones, card_id: u64, delta: i64) -> Result<u64, CharacterError> {
    let card = zones
        .active_mut(card_id)
        .ok_or(CharacterError::CardNotActive { card_id })?;

    card.counter = apply_delta(card.counter, delta);
    Ok(card.counter)
}

fn apply_delta(counter: u64, delta: i64) -> u64 {
    if delta >= 0 {
        counter.saturating_add(delta.unsigned_abs())
    } else {
        counter.saturating_sub(delta.unsigned_abs())
    }
}

/// Accept any JSON integer, including integral floats like `2.0`.
/// Integers beyond the `i64` range saturate.
pub fn parse_delta(value: &Value) -> Result<i64, CharacterError> {
    let number = match value {
        Value::Number(number) => number,
        _ => return Err(CharacterError::InvalidInput("delta must be a number".to_string())),
    };

    if let Some(delta) = number.as_i64() {
        return Ok(delta);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }

    match number.as_f64() {
        // `as` saturates for floats outside the i64 range
        Some(float) if float.is_finite() && float.fract() == 0.0 => Ok(float as i64),
        _ => Err(CharacterError::InvalidInput("delta must be an integer".to_string())),
    }
}

/// Resolve every zone against the cards of the character's class.
///
/// Ids that no longer resolve are dropped from the view
/// instead of failing the read.
pub fn project(character: &Character, class: &Class, catalog: &[Card]) -> CharacterView {
    let class_cards: Vec<&Card> = catalog
        .iter()
        .filter(|card| card.class_id == character.class_id)
        .collect();

    let resolve = |id: u64, counter: Option<u64>| {
        class_cards.iter().find(|card| card.id == id).map(|card| CardView {
            id: card.id,
            name: card.name.clone(),
            level: card.level,
            image: card.image.clone(),
            counter,
        })
    };

    let plain = |ids: &[u64]| ids.iter().filter_map(|&id| resolve(id, None)).collect::<Vec<_>>();
    let zones = &character.zones;

    CharacterView {
        id: character.id,
        name: character.name.clone(),
        game_id: character.game_id,
        class_id: character.class_id,
        level: character.level,
        hand_size: class.hand_size,
        zones: ZonesView {
            hand: plain(zones.hand.as_slice()),
            active: zones
                .active
                .iter()
                .filter_map(|&ActiveCard { id, counter }| resolve(id, Some(counter)))
                .collect(),
            discard: plain(zones.discard.as_slice()),
            lost: plain(zones.lost.as_slice()),
        },
    }
}
