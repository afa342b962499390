use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::handlers::run_blocking;
use crate::models::api::{CurrentUserResponse, LoginRequest, SuccessResponse};
use crate::models::user::Role;
use crate::utils::cookies::session_cookie;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::info;

/// Log in, enrolling the password on a user's first login
///
/// POST /api/login {username, password}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let Json(request) = body.map_err(|e| AuthError::InvalidInput(e.body_text()))?;

    let login_state = Arc::clone(&state);
    let token = run_blocking(move || -> Result<String, AuthError> {
        login_state
            .sessions
            .login(&request.username, &request.password)
    })
    .await?;

    let cookie = session_cookie(&state.config.auth.cookie_name, &token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse::ok()),
    )
        .into_response())
}

/// Who the session belongs to
///
/// GET /api/user
pub async fn current_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CurrentUserResponse>, AuthError> {
    let user = run_blocking(move || state.authenticate(&headers)).await?;

    Ok(Json(CurrentUserResponse {
        username: user.username,
        role: user.role,
    }))
}

/// Clear a user's credential and revoke all of their sessions
///
/// POST /api/users/{username}/reset (admin)
pub async fn reset_credential_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<SuccessResponse>, AuthError> {
    let Path(username) = path.map_err(|e| AuthError::InvalidInput(e.body_text()))?;

    run_blocking(move || -> Result<(), AuthError> {
        let admin = state.authenticate_as(&headers, Role::Admin)?;
        let revoked = state.sessions.reset_credential(&username)?;

        info!(
            admin = %admin.username,
            username = %username,
            revoked_sessions = revoked,
            "Admin reset credential"
        );
        Ok(())
    })
    .await?;

    Ok(Json(SuccessResponse::ok()))
}
