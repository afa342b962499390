use crate::models::character::Character;
use crate::models::user::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassQuery {
    pub game_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardQuery {
    pub class_id: Option<u64>,
    pub level: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    #[serde(default)]
    pub name: String,
    pub game_id: Option<u64>,
    pub class_id: Option<u64>,
    pub level: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandRequest {
    pub card_ids: Option<Vec<u64>>,
}

/// Zones stay strings here so unknown names are reported as bad input
/// rather than as a body deserialization failure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub card_id: Option<u64>,
    #[serde(default)]
    pub from_zone: String,
    #[serde(default)]
    pub to_zone: String,
}

/// `delta` is kept as raw JSON so fractional and non-numeric values can be rejected explicitly
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRequest {
    pub card_id: Option<u64>,
    pub delta: Option<serde_json::Value>,
}

/// Minimal character projection used by list and create
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    pub id: u64,
    pub name: String,
    pub game_id: u64,
    pub class_id: u64,
    pub level: u32,
}

impl From<&Character> for CharacterSummary {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            game_id: character.game_id,
            class_id: character.class_id,
            level: character.level,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub id: u64,
    pub name: String,
    pub level: u32,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub counter: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZonesView {
    pub hand: Vec<CardView>,
    pub active: Vec<CardView>,
    pub discard: Vec<CardView>,
    pub lost: Vec<CardView>,
}

/// Denormalized character with every zone resolved against the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterView {
    pub id: u64,
    pub name: String,
    pub game_id: u64,
    pub class_id: u64,
    pub level: u32,
    pub hand_size: usize,
    pub zones: ZonesView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CounterResponse {
    pub success: bool,
    pub counter: u64,
}
