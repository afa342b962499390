use dashmap::DashMap;

/// Length in bytes of a session token before hex encoding
pub const TOKEN_BYTES: usize = 16;

/// Backend that maps opaque session tokens to usernames
pub trait SessionStore: Send + Sync {
    /// Mint a new token bound to `username`
    fn create(&self, username: &str) -> String;

    /// Username bound to `token`, if any
    fn resolve(&self, token: &str) -> Option<String>;

    /// Drop a single token
    fn revoke(&self, token: &str) -> bool;

    /// Drop every token bound to `username`, returning how many were removed
    fn revoke_by_user(&self, username: &str) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local session table. Nothing survives a restart.
pub struct InMemorySessionStore {
    sessions: DashMap<String, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, username: &str) -> String {
        let token = generate_token();
        self.sessions.insert(token.clone(), username.to_string());
        token
    }

    fn resolve(&self, token: &str) -> Option<String> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    fn revoke_by_user(&self, username: &str) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, owner| {
            if owner == username {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// 16 bytes from the thread-local CSPRNG, hex encoded
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}
