use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four containers a character's cards live in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Hand,
    Active,
    Discard,
    Lost,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Hand, Zone::Active, Zone::Discard, Zone::Lost];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Hand => "hand",
            Zone::Active => "active",
            Zone::Discard => "discard",
            Zone::Lost => "lost",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hand" => Ok(Zone::Hand),
            "active" => Ok(Zone::Active),
            "discard" => Ok(Zone::Discard),
            "lost" => Ok(Zone::Lost),
            other => Err(format!("Unknown zone '{}'", other)),
        }
    }
}

/// A card in play together with its counter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCard {
    pub id: u64,
    pub counter: u64,
}

impl ActiveCard {
    pub fn new(id: u64) -> Self {
        Self { id, counter: 0 }
    }
}

/// Zone assignment of a single character
///
/// Insertion order is display order. Every mutation goes through
/// [`Zones::remove`] / [`Zones::push`] so the active container and the plain
/// containers are handled uniformly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    #[serde(default)]
    pub hand: Vec<u64>,
    #[serde(default)]
    pub active: Vec<ActiveCard>,
    #[serde(default)]
    pub discard: Vec<u64>,
    #[serde(default)]
    pub lost: Vec<u64>,
}

impl Zones {
    /// Ids currently held in `zone`, in order
    pub fn ids(&self, zone: Zone) -> Vec<u64> {
        match zone {
            Zone::Active => self.active.iter().map(|card| card.id).collect(),
            Zone::Hand => self.hand.clone(),
            Zone::Discard => self.discard.clone(),
            Zone::Lost => self.lost.clone(),
        }
    }

    pub fn contains(&self, zone: Zone, card_id: u64) -> bool {
        match self.plain(zone) {
            Some(ids) => ids.contains(&card_id),
            None => self.active.iter().any(|card| card.id == card_id),
        }
    }

    /// Remove the first entry for `card_id` from `zone`.
    /// Returns false and leaves the zone untouched if the card is absent.
    pub fn remove(&mut self, zone: Zone, card_id: u64) -> bool {
        match self.plain_mut(zone) {
            Some(ids) => match ids.iter().position(|id| *id == card_id) {
                Some(index) => {
                    ids.remove(index);
                    true
                }
                None => false,
            },
            None => match self.active.iter().position(|card| card.id == card_id) {
                Some(index) => {
                    self.active.remove(index);
                    true
                }
                None => false,
            },
        }
    }

    /// Append `card_id` to the end of `zone`; entering `active` starts the counter at 0
    pub fn push(&mut self, zone: Zone, card_id: u64) {
        match self.plain_mut(zone) {
            Some(ids) => ids.push(card_id),
            None => self.active.push(ActiveCard::new(card_id)),
        }
    }

    pub fn active_mut(&mut self, card_id: u64) -> Option<&mut ActiveCard> {
        self.active.iter_mut().find(|card| card.id == card_id)
    }

    /// Replace the hand and clear every other zone
    pub fn reset_with_hand(&mut self, hand: Vec<u64>) {
        self.hand = hand;
        self.active.clear();
        self.discard.clear();
        self.lost.clear();
    }

    /// True while no hand has been committed
    pub fn is_pre_draft(&self) -> bool {
        self.hand.is_empty() && self.active.is_empty() && self.discard.is_empty() && self.lost.is_empty()
    }

    // `None` for the active zone, which holds counters alongside ids
    fn plain(&self, zone: Zone) -> Option<&Vec<u64>> {
        match zone {
            Zone::Hand => Some(&self.hand),
            Zone::Discard => Some(&self.discard),
            Zone::Lost => Some(&self.lost),
            Zone::Active => None,
        }
    }

    fn plain_mut(&mut self, zone: Zone) -> Option<&mut Vec<u64>> {
        match zone {
            Zone::Hand => Some(&mut self.hand),
            Zone::Discard => Some(&mut self.discard),
            Zone::Lost => Some(&mut self.lost),
            Zone::Active => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u64,
    /// Owning account
    pub username: String,
    pub name: String,
    pub game_id: u64,
    pub class_id: u64,
    pub level: u32,
    #[serde(default)]
    pub zones: Zones,
}

impl Character {
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_parse() {
        assert_eq!("hand".parse::<Zone>(), Ok(Zone::Hand));
        assert_eq!("active".parse::<Zone>(), Ok(Zone::Active));
        assert_eq!("discard".parse::<Zone>(), Ok(Zone::Discard));
        assert_eq!("lost".parse::<Zone>(), Ok(Zone::Lost));
        assert!("Hand".parse::<Zone>().is_err());
        assert!("graveyard".parse::<Zone>().is_err());
    }

    #[test]
    fn test_push_to_active_starts_counter_at_zero() {
        let mut zones = Zones::default();
        zones.push(Zone::Active, 7);

        assert_eq!(zones.active, vec![ActiveCard { id: 7, counter: 0 }]);
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut zones = Zones::default();
        zones.reset_with_hand(vec![1, 2, 1]);

        assert!(zones.remove(Zone::Hand, 1));
        assert_eq!(zones.hand, vec![2, 1]);
    }

    #[test]
    fn test_remove_absent_card() {
        let mut zones = Zones::default();
        zones.reset_with_hand(vec![1, 2]);

        assert!(!zones.remove(Zone::Discard, 1));
        assert!(!zones.remove(Zone::Active, 1));
        assert_eq!(zones.hand, vec![1, 2]);
    }

    #[test]
    fn test_pre_draft() {
        let mut zones = Zones::default();
        assert!(zones.is_pre_draft());

        zones.reset_with_hand(vec![3]);
        assert!(!zones.is_pre_draft());
    }

    #[test]
    fn test_document_layout_is_compatible() {
        let json = r#"{
            "id": 1,
            "username": "alice",
            "name": "Brute",
            "gameId": 2,
            "classId": 3,
            "level": 1,
            "zones": {"hand": [4], "active": [{"id": 5, "counter": 2}], "discard": [], "lost": [6]}
        }"#;

        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.zones.hand, vec![4]);
        assert_eq!(character.zones.active[0].counter, 2);
        assert_eq!(character.zones.ids(Zone::Lost), vec![6]);
    }
}
