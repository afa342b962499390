// Application state (AppState)

use crate::core::config::Config;
use crate::core::error::AuthError;
use crate::engine::characters::CharacterEngine;
use crate::models::user::{Role, User};
use crate::security::session_manager::SessionManager;
use crate::stores::document_store::DocumentStore;
use crate::stores::session_store::{InMemorySessionStore, SessionStore};
use crate::utils::cookies::session_token;
use axum::http::HeaderMap;
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// Persisted document (identities, catalog, characters)
    pub store: Arc<DocumentStore>,

    /// Login, token resolution and role checks
    pub sessions: Arc<SessionManager>,

    /// Character and zone operations
    pub characters: Arc<CharacterEngine>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: DocumentStore) -> Self {
        Self::with_session_store(config, store, Arc::new(InMemorySessionStore::new()))
    }

    /// Build state around an alternate session backend
    pub fn with_session_store(config: Config, store: DocumentStore, session_store: Arc<dyn SessionStore>) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(store);

        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&store),
            session_store,
            config.auth.min_password_length,
        ));

        Self {
            characters: Arc::new(CharacterEngine::new(Arc::clone(&store))),
            sessions,
            store,
            config,
        }
    }

    /// Resolve the session cookie on a request to its user
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<User, AuthError> {
        let token = session_token(headers, &self.config.auth.cookie_name);
        self.sessions.resolve(token.as_deref())
    }

    /// Like [`AppState::authenticate`], but the user must also hold `role`
    pub fn authenticate_as(&self, headers: &HeaderMap, role: Role) -> Result<User, AuthError> {
        let token = session_token(headers, &self.config.auth.cookie_name);
        self.sessions.resolve_with_role(token.as_deref(), role)
    }
}
