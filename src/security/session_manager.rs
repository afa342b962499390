use crate::core::error::AuthError;
use crate::models::user::{Role, User};
use crate::security::credentials::{hash_password, meets_length_policy, verify_password};
use crate::stores::document_store::DocumentStore;
use crate::stores::session_store::SessionStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Issues and validates session tokens and enforces roles
///
/// Credentials live in the document store; tokens live only in the injected
/// [`SessionStore`], so a restart forces every user to log in again.
pub struct SessionManager {
    store: Arc<DocumentStore>,
    sessions: Arc<dyn SessionStore>,
    min_password_length: usize,
}

impl SessionManager {
    pub fn new(store: Arc<DocumentStore>, sessions: Arc<dyn SessionStore>, min_password_length: usize) -> Self {
        Self {
            store,
            sessions,
            min_password_length,
        }
    }

    /// Authenticate and mint a session token.
    ///
    /// The first login of a user without a credential enrols `password`.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .store
            .read(|doc| doc.user(username).cloned())?
            .ok_or_else(|| {
                warn!(username = %username, "Login for unknown user");
                AuthError::InvalidCredentials
            })?;

        let token = match &user.password_hash {
            Some(stored) => {
                self.check_password(username, password, stored)?;
                self.issue_session(username, stored)?
            }
            None => self.enroll(username, password)?,
        };

        info!(username = %user.username, role = %user.role, "Login succeeded");

        Ok(token)
    }

    /// Map a token to its user, evicting tokens whose user no longer exists
    pub fn resolve(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        let username = self.sessions.resolve(token).ok_or_else(|| {
            debug!("Unknown session token");
            AuthError::Unauthenticated
        })?;

        match self.store.read(|doc| doc.user(&username).cloned())? {
            Some(user) => Ok(user),
            None => {
                self.sessions.revoke(token);
                warn!(username = %username, "Evicted session of removed user");
                Err(AuthError::Unauthenticated)
            }
        }
    }

    /// Resolve the token and require `role` in one step
    pub fn resolve_with_role(&self, token: Option<&str>, role: Role) -> Result<User, AuthError> {
        let user = self.resolve(token)?;
        Self::require_role(&user, role)?;
        Ok(user)
    }

    pub fn require_role(user: &User, role: Role) -> Result<(), AuthError> {
        if user.role == role {
            Ok(())
        } else {
            warn!(username = %user.username, required = %role, actual = %user.role, "Role check failed");
            Err(AuthError::Forbidden)
        }
    }

    /// Clear a user's credential and drop all of their sessions.
    /// Returns the number of sessions revoked.
    ///
    /// Revocation happens under the store lock, so a login that verified the
    /// old credential either finishes before it (and is revoked) or fails.
    pub fn reset_credential(&self, username: &str) -> Result<usize, AuthError> {
        let revoked = self.store.transaction_then(
            |doc| -> Result<(), AuthError> {
                let user = doc.user_mut(username).ok_or(AuthError::UserNotFound)?;
                user.password_hash = None;
                Ok(())
            },
            |()| self.sessions.revoke_by_user(username),
        )?;

        info!(username = %username, revoked_sessions = revoked, "Credential reset");

        Ok(revoked)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn check_password(&self, username: &str, password: &str, stored: &str) -> Result<(), AuthError> {
        match verify_password(password, stored) {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(username = %username, "Login with wrong password");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => {
                warn!(username = %username, error = %e, "Stored credential cannot be verified, reset required");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Mint a token, provided `verified` is still the stored credential
    fn issue_session(&self, username: &str, verified: &str) -> Result<String, AuthError> {
        self.store.read_exclusive(|doc| -> Result<String, AuthError> {
            let current = doc.user(username).and_then(|user| user.password_hash.as_deref());

            if current != Some(verified) {
                warn!(username = %username, "Credential changed while logging in");
                return Err(AuthError::InvalidCredentials);
            }

            Ok(self.sessions.create(username))
        })
    }

    fn enroll(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if !meets_length_policy(password, self.min_password_length) {
            return Err(AuthError::PasswordTooShort {
                min: self.min_password_length,
            });
        }

        // Hash outside the store lock; it is the slow part
        let hash = hash_password(password)?;

        let enrolment = self.store.transaction_then(
            |doc| -> Result<Option<String>, AuthError> {
                let user = doc.user_mut(username).ok_or(AuthError::InvalidCredentials)?;
                // Another login enrolled first; this attempt must match it
                if let Some(existing) = user.password_hash.clone() {
                    return Ok(Some(existing));
                }
                user.password_hash = Some(hash);
                Ok(None)
            },
            |raced| match raced {
                Some(existing) => Enrolment::Raced(existing),
                None => Enrolment::Issued(self.sessions.create(username)),
            },
        )?;

        match enrolment {
            Enrolment::Issued(token) => {
                info!(username = %username, "Credential enrolled on first login");
                Ok(token)
            }
            Enrolment::Raced(existing) => {
                self.check_password(username, password, &existing)?;
                self.issue_session(username, &existing)
            }
        }
    }
}

enum Enrolment {
    Issued(String),
    Raced(String),
}
