use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::handlers::run_blocking;
use crate::models::api::{CardQuery, ClassQuery};
use crate::models::catalog::{Card, Class, Game};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use std::sync::Arc;

/// GET /api/games
pub async fn games_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Game>>, AuthError> {
    let games = run_blocking(move || -> Result<Vec<Game>, AuthError> {
        state.authenticate(&headers)?;
        Ok(state.store.read(|doc| doc.games.clone())?)
    })
    .await?;

    Ok(Json(games))
}

/// GET /api/classes?gameId=
pub async fn classes_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ClassQuery>,
) -> Result<Json<Vec<Class>>, AuthError> {
    let classes = run_blocking(move || -> Result<Vec<Class>, AuthError> {
        state.authenticate(&headers)?;
        Ok(state.store.read(|doc| doc.classes_for_game(query.game_id))?)
    })
    .await?;

    Ok(Json(classes))
}

/// Cards of a class up to a level, as offered while drafting a hand
///
/// GET /api/cards?classId=&level=
pub async fn cards_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CardQuery>,
) -> Result<Json<Vec<Card>>, AuthError> {
    let cards = run_blocking(move || -> Result<Vec<Card>, AuthError> {
        state.authenticate(&headers)?;
        Ok(state
            .store
            .read(|doc| doc.cards_filtered(query.class_id, query.level))?)
    })
    .await?;

    Ok(Json(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{create_test_state, login_headers};
    use axum::{http::StatusCode, response::IntoResponse};

    #[tokio::test]
    async fn test_catalog_requires_session() {
        let (_temp_dir, state) = create_test_state();

        let err = games_handler(State(state), HeaderMap::new()).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_games_and_classes() {
        let (_temp_dir, state) = create_test_state();
        let headers = login_headers(&state, "alice", "abcd");

        let Json(games) = games_handler(State(state.clone()), headers.clone()).await.unwrap();
        assert_eq!(games.len(), 2);

        let Json(classes) = classes_handler(
            State(state.clone()),
            headers.clone(),
            Query(ClassQuery { game_id: Some(1) }),
        )
        .await
        .unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes.iter().all(|class| class.game_id == 1));

        let Json(all) = classes_handler(State(state), headers, Query(ClassQuery { game_id: None }))
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_cards_filtered_by_class_and_level() {
        let (_temp_dir, state) = create_test_state();
        let headers = login_headers(&state, "alice", "abcd");

        let Json(cards) = cards_handler(
            State(state),
            headers,
            Query(CardQuery {
                class_id: Some(1),
                level: Some(1),
            }),
        )
        .await
        .unwrap();

        let ids: Vec<u64> = cards.iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
