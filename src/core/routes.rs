// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{auth, catalog, characters};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/api/login", post(auth::login_handler))

        // Session endpoints
        .route("/api/user", get(auth::current_user_handler))
        .route("/api/games", get(catalog::games_handler))
        .route("/api/classes", get(catalog::classes_handler))
        .route("/api/cards", get(catalog::cards_handler))
        .route(
            "/api/characters",
            get(characters::list_characters_handler).post(characters::create_character_handler),
        )
        .route("/api/characters/{id}", get(characters::get_character_handler))
        .route("/api/characters/{id}/hand", post(characters::commit_hand_handler))
        .route("/api/characters/{id}/move", post(characters::move_card_handler))
        .route("/api/characters/{id}/counter", post(characters::adjust_counter_handler))

        // Admin endpoints
        .route("/api/users/{username}/reset", post(auth::reset_credential_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_json, create_test_state};
    use crate::models::api::ErrorResponse;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (_temp_dir, state) = create_test_state();
        let router = build_router(state);

        let response = router
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let (_temp_dir, state) = create_test_state();
        let router = build_router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_cookie_authenticates_next_request() {
        let (_temp_dir, state) = create_test_state();
        let router = build_router(state);

        let login = Request::builder()
            .method("POST")
            .uri("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"alice","password":"abcd"}"#))
            .unwrap();
        let response = router.clone().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let request = Request::builder()
            .uri("/api/characters")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_character_id_is_json_400() {
        let (_temp_dir, state) = create_test_state();
        let router = build_router(state);

        for uri in ["/api/characters/abc", "/api/characters/99999999999999999999999/hand"] {
            let method = if uri.ends_with("/hand") { "POST" } else { "GET" };
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"cardIds":[1,2]}"#))
                .unwrap();
            let response = router.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body: ErrorResponse = body_json(response).await;
            assert!(!body.success);
            assert!(body.error.starts_with("Invalid data"));
        }
    }
}
