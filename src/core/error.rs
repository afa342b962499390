// Centralized error handling

use crate::models::api::ErrorResponse;
use crate::models::character::Zone;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

/// Coarse classification shared by every error surface.
/// Callers branch on this, never on message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    InvalidInput,
    InvalidCredentials,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            // 401 is reserved for a missing session
            ErrorKind::InvalidCredentials => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(kind: ErrorKind, message: String) -> Response {
    (
        kind.status(),
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
        .into_response()
}

/// Errors raised by login, session resolution and role checks
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthenticated => ErrorKind::Unauthenticated,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AuthError::PasswordTooShort { .. } => ErrorKind::InvalidInput,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidInput(_) => ErrorKind::InvalidInput,
            AuthError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Internal(e) = &self {
            error!(error = %format!("{:#}", e), "Auth request failed");
        }

        error_response(self.kind(), self.to_string())
    }
}

/// Errors raised by character reads and zone transitions
#[derive(Error, Debug)]
pub enum CharacterError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Character not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Hand must contain exactly {expected} cards")]
    InvalidHandSize { expected: usize, actual: usize },

    #[error("Invalid card selection")]
    InvalidCardSelection { card_id: u64 },

    #[error("Card not found in source zone")]
    CardNotInZone { card_id: u64, zone: Zone },

    #[error("Card not in active zone")]
    CardNotActive { card_id: u64 },

    #[error("Invalid game or class")]
    InvalidGameOrClass,

    #[error("Invalid data: {0}")]
    InvalidInput(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl CharacterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CharacterError::Auth(e) => e.kind(),
            CharacterError::NotFound => ErrorKind::NotFound,
            CharacterError::Forbidden => ErrorKind::Forbidden,
            CharacterError::InvalidHandSize { .. }
            | CharacterError::InvalidCardSelection { .. }
            | CharacterError::CardNotInZone { .. }
            | CharacterError::CardNotActive { .. }
            | CharacterError::InvalidGameOrClass
            | CharacterError::InvalidInput(_) => ErrorKind::InvalidInput,
            CharacterError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for CharacterError {
    fn into_response(self) -> Response {
        match self {
            CharacterError::Auth(e) => e.into_response(),
            CharacterError::Internal(e) => {
                error!(error = %format!("{:#}", e), "Character request failed");
                error_response(ErrorKind::Internal, "Internal server error".to_string())
            }
            other => error_response(other.kind(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(AuthError::Unauthenticated.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::InvalidCredentials.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::PasswordTooShort { min: 4 }.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::UserNotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Internal(anyhow::anyhow!("disk on fire")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_character_error_statuses() {
        assert_eq!(CharacterError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(CharacterError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            CharacterError::InvalidHandSize { expected: 2, actual: 3 }.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CharacterError::CardNotInZone { card_id: 1, zone: Zone::Hand }
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CharacterError::CardNotActive { card_id: 1 }.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_wrapped_auth_error_keeps_kind() {
        let err = CharacterError::from(AuthError::Unauthenticated);

        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_hand_size_message() {
        let err = CharacterError::InvalidHandSize { expected: 10, actual: 9 };
        assert_eq!(err.to_string(), "Hand must contain exactly 10 cards");
    }
}
