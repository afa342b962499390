use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::config::Config;
use crate::models::document::Document;
use crate::models::user::{Role, User};
use crate::stores::document_store::DocumentStore;

/// Make sure the document exists, seed the bootstrap admin and report what was loaded
pub fn prepare_document(store: &DocumentStore, config: &Config) -> Result<()> {
    if !store.exists() {
        warn!(path = %store.path().display(), "Document not found, creating an empty one");
        store
            .save(&Document::default())
            .context("Failed to create empty document")?;
    }

    if let Some(admin) = &config.bootstrap.admin_username {
        let created = store.transaction(|doc| -> Result<bool> {
            if doc.user(admin).is_some() {
                return Ok(false);
            }
            doc.users.push(User::new(admin, Role::Admin));
            Ok(true)
        })?;

        if created {
            info!(username = %admin, "Bootstrap admin created; password is set on first login");
        }
    }

    let document = store.load().context("Failed to load document")?;
    let pending = document.users.iter().filter(|user| !user.has_credential()).count();

    info!(
        users = document.users.len(),
        users_without_credential = pending,
        games = document.games.len(),
        classes = document.classes.len(),
        cards = document.cards.len(),
        characters = document.characters.len(),
        "Document loaded"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(admin: Option<&str>) -> Config {
        let mut config = Config::from_toml("[server]\nport = 3000\n").unwrap();
        config.bootstrap.admin_username = admin.map(str::to_string);
        config
    }

    #[test]
    fn test_creates_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("db.json"));

        prepare_document(&store, &config(None)).unwrap();

        assert!(store.exists());
        let document = store.load().unwrap();
        assert!(document.users.is_empty());
        assert_eq!(document.next_ids.character_id, 1);
    }

    #[test]
    fn test_seeds_admin_once() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("db.json"));
        let config = config(Some("root"));

        prepare_document(&store, &config).unwrap();
        prepare_document(&store, &config).unwrap();

        let document = store.load().unwrap();
        assert_eq!(document.users.len(), 1);
        let admin = document.user("root").unwrap();
        assert!(admin.is_admin());
        assert!(!admin.has_credential());
    }

    #[test]
    fn test_keeps_existing_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("db.json"));
        let mut existing = User::new("root", Role::Admin);
        existing.password_hash = Some("stored".to_string());
        store
            .save(&Document {
                users: vec![existing],
                ..Document::default()
            })
            .unwrap();

        prepare_document(&store, &config(Some("root"))).unwrap();

        let document = store.load().unwrap();
        assert_eq!(document.users.len(), 1);
        assert_eq!(document.user("root").unwrap().password_hash.as_deref(), Some("stored"));
    }

    #[test]
    fn test_rejects_corrupt_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = DocumentStore::new(path);
        assert!(prepare_document(&store, &config(None)).is_err());
    }
}
