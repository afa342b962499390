use crate::models::document::Document;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// JSON document holding users, catalog and characters
///
/// Every read loads the file from disk; every write replaces it whole.
/// Mutations run through [`DocumentStore::transaction`], which holds a
/// store-wide lock for the entire load-mutate-save cycle so concurrent
/// requests are serialized instead of losing updates.
pub struct DocumentStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the current document from disk
    pub fn load(&self) -> Result<Document> {
        let content = fs::read(&self.path)
            .context(format!("Failed to read document: {}", self.path.display()))?;

        serde_json::from_slice(&content)
            .context(format!("Failed to parse document: {}", self.path.display()))
    }

    /// Replace the document on disk.
    /// Writes a sibling file first and renames it so readers never see a partial write.
    pub fn save(&self, document: &Document) -> Result<()> {
        let content = serde_json::to_vec_pretty(document).context("Failed to serialize document")?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content)
            .context(format!("Failed to write document: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .context(format!("Failed to replace document: {}", self.path.display()))?;

        Ok(())
    }

    /// Run a read-only projection against the current document
    pub fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> Result<T> {
        let document = self.load()?;
        Ok(f(&document))
    }

    /// Load, mutate and save under the store lock.
    ///
    /// The document is only written when `f` returns `Ok`; on `Err` the file
    /// is left exactly as it was.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&mut Document) -> Result<T, E>) -> Result<T, E>
    where
        E: From<anyhow::Error>,
    {
        self.transaction_then(f, |value| value)
    }

    /// Like [`DocumentStore::transaction`], but `then` runs after a successful
    /// save while the lock is still held
    pub fn transaction_then<T, U, E>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<T, E>,
        then: impl FnOnce(T) -> U,
    ) -> Result<U, E>
    where
        E: From<anyhow::Error>,
    {
        let _guard = self.lock();

        let mut document = self.load()?;
        let value = f(&mut document)?;
        self.save(&document)?;

        Ok(then(value))
    }

    /// Read under the store lock; no transaction can commit while `f` runs
    pub fn read_exclusive<T, E>(&self, f: impl FnOnce(&Document) -> Result<T, E>) -> Result<T, E>
    where
        E: From<anyhow::Error>,
    {
        let _guard = self.lock();

        let document = self.load()?;
        f(&document)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means an earlier closure panicked before saving
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, User};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_store(temp_dir: &TempDir) -> DocumentStore {
        let store = DocumentStore::new(temp_dir.path().join("db.json"));
        store.save(&Document::default()).unwrap();
        store
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir);

        let mut document = Document::default();
        document.users.push(User::new("alice", Role::Player));
        store.save(&document).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, document);
        assert!(!temp_dir.path().join("db.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = DocumentStore::new(temp_dir.path().join("missing.json"));

        assert!(!store.exists());
        assert!(store.load().is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");
        fs::write(&path, "{ not json").unwrap();

        let store = DocumentStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_transaction_commits_on_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir);

        let id = store
            .transaction(|doc| -> Result<u64> { Ok(doc.allocate_character_id()) })
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(store.load().unwrap().next_ids.character_id, 2);
    }

    #[test]
    fn test_transaction_discards_on_err() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir);

        let result = store.transaction(|doc| -> Result<()> {
            doc.users.push(User::new("mallory", Role::Admin));
            doc.allocate_character_id();
            anyhow::bail!("rejected")
        });

        assert!(result.is_err());
        let loaded = store.load().unwrap();
        assert!(loaded.users.is_empty());
        assert_eq!(loaded.next_ids.character_id, 1);
    }

    #[test]
    fn test_transaction_then_runs_only_after_save() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir);

        let committed = store
            .transaction_then(
                |doc| -> Result<u64> { Ok(doc.allocate_character_id()) },
                |id| id * 10,
            )
            .unwrap();
        assert_eq!(committed, 10);
        assert_eq!(store.load().unwrap().next_ids.character_id, 2);

        let mut ran = false;
        let result = store.transaction_then(|_doc| -> Result<()> { anyhow::bail!("rejected") }, |_| ran = true);
        assert!(result.is_err());
        assert!(!ran);
    }

    #[test]
    fn test_read_exclusive_sees_committed_state() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir);
        store
            .transaction(|doc| -> Result<()> {
                doc.users.push(User::new("alice", Role::Player));
                Ok(())
            })
            .unwrap();

        let found = store
            .read_exclusive(|doc| -> Result<bool> { Ok(doc.user("alice").is_some()) })
            .unwrap();
        assert!(found);
    }

    #[test]
    fn test_concurrent_transactions_do_not_lose_updates() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(create_store(&temp_dir));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..5 {
                        store
                            .transaction(|doc| -> Result<u64> { Ok(doc.allocate_character_id()) })
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load().unwrap().next_ids.character_id, 41);
    }
}
