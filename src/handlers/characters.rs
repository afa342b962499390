use crate::core::error::CharacterError;
use crate::core::state::AppState;
use crate::engine::characters::NewCharacter;
use crate::engine::rules::parse_delta;
use crate::handlers::run_blocking;
use crate::models::api::{
    CharacterSummary, CharacterView, CounterRequest, CounterResponse, CreateCharacterRequest,
    HandRequest, MoveRequest, SuccessResponse,
};
use crate::models::character::Zone;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::HeaderMap,
    response::Json,
};
use std::sync::Arc;

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, CharacterError> {
    body.map(|Json(value)| value)
        .map_err(|e| CharacterError::InvalidInput(e.body_text()))
}

fn character_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, CharacterError> {
    path.map(|Path(id)| id)
        .map_err(|e| CharacterError::InvalidInput(e.body_text()))
}

fn parse_zone(name: &str) -> Result<Zone, CharacterError> {
    name.parse().map_err(CharacterError::InvalidInput)
}

/// GET /api/characters
pub async fn list_characters_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<CharacterSummary>>, CharacterError> {
    let characters = run_blocking(move || -> Result<Vec<CharacterSummary>, CharacterError> {
        let actor = state.authenticate(&headers)?;
        state.characters.list(&actor)
    })
    .await?;

    Ok(Json(characters))
}

/// POST /api/characters {name, gameId, classId, level}
pub async fn create_character_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CreateCharacterRequest>, JsonRejection>,
) -> Result<Json<CharacterSummary>, CharacterError> {
    let request = json_body(body)?;

    let summary = run_blocking(move || -> Result<CharacterSummary, CharacterError> {
        let actor = state.authenticate(&headers)?;

        let (Some(game_id), Some(class_id), Some(level)) = (request.game_id, request.class_id, request.level) else {
            return Err(CharacterError::InvalidInput(
                "gameId, classId and level are required".to_string(),
            ));
        };
        let new = NewCharacter {
            name: request.name,
            game_id,
            class_id,
            level,
        };

        state.characters.create(&actor, new)
    })
    .await?;

    Ok(Json(summary))
}

/// GET /api/characters/{id}
pub async fn get_character_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<CharacterView>, CharacterError> {
    let character_id = character_id(path)?;

    let view = run_blocking(move || -> Result<CharacterView, CharacterError> {
        let actor = state.authenticate(&headers)?;
        state.characters.view(character_id, &actor)
    })
    .await?;

    Ok(Json(view))
}

/// Draft a hand; clears active, discard and lost
///
/// POST /api/characters/{id}/hand {cardIds}
pub async fn commit_hand_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<HandRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, CharacterError> {
    let character_id = character_id(path)?;
    let request = json_body(body)?;

    run_blocking(move || -> Result<(), CharacterError> {
        let actor = state.authenticate(&headers)?;
        let card_ids = request
            .card_ids
            .ok_or_else(|| CharacterError::InvalidInput("cardIds is required".to_string()))?;

        state.characters.commit_hand(character_id, &actor, card_ids)
    })
    .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/characters/{id}/move {cardId, fromZone, toZone}
pub async fn move_card_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, CharacterError> {
    let character_id = character_id(path)?;
    let request = json_body(body)?;

    run_blocking(move || -> Result<(), CharacterError> {
        let actor = state.authenticate(&headers)?;
        let card_id = request
            .card_id
            .ok_or_else(|| CharacterError::InvalidInput("cardId is required".to_string()))?;
        let from = parse_zone(&request.from_zone)?;
        let to = parse_zone(&request.to_zone)?;

        state.characters.move_card(character_id, &actor, card_id, from, to)
    })
    .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/characters/{id}/counter {cardId, delta}
pub async fn adjust_counter_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<CounterRequest>, JsonRejection>,
) -> Result<Json<CounterResponse>, CharacterError> {
    let character_id = character_id(path)?;
    let request = json_body(body)?;

    let counter = run_blocking(move || -> Result<u64, CharacterError> {
        let actor = state.authenticate(&headers)?;
        let card_id = request
            .card_id
            .ok_or_else(|| CharacterError::InvalidInput("cardId is required".to_string()))?;
        let delta = request
            .delta
            .as_ref()
            .ok_or_else(|| CharacterError::InvalidInput("delta is required".to_string()))
            .and_then(parse_delta)?;

        state.characters.adjust_counter(character_id, &actor, card_id, delta)
    })
    .await?;

    Ok(Json(CounterResponse {
        success: true,
        counter,
    }))
}
