use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub sessions: usize,
}

/// Health check handler
///
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: current_timestamp(),
            sessions: state.sessions.session_count(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_json, create_test_state, login_headers};

    #[tokio::test]
    async fn test_health_handler() {
        let (_temp_dir, state) = create_test_state();

        let response = health_handler(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_sessions() {
        let (_temp_dir, state) = create_test_state();
        login_headers(&state, "alice", "abcd");

        let response = health_handler(State(state)).await.into_response();
        let health: HealthResponse = body_json(response).await;

        assert_eq!(health.status, "ok");
        assert!(health.timestamp > 0);
        assert_eq!(health.sessions, 1);
    }
}
