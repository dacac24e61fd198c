//! Persisted session token
//!
//! The bearer token survives restarts as a small JSON file under the
//! client data directory, read once at session bootstrap and removed on
//! logout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Fixed file name for the stored token
const TOKEN_FILE: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// Token storage
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// Create a token storage rooted at the given data directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let path = base_dir.into().join(TOKEN_FILE);
        Self { path }
    }

    /// Ensure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Save the token
    pub fn save(&self, token: &str) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(&StoredToken {
            token: token.to_string(),
        })?;
        fs::write(&self.path, json)
    }

    /// Load the token
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        let stored: StoredToken = serde_json::from_str(&json).ok()?;
        Some(stored.token)
    }

    /// Check whether a token is stored
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the stored token
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Storage path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_delete_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TokenStorage::new(temp_dir.path());

        assert!(!storage.exists());
        assert!(storage.load().is_none());

        storage.save("t1").unwrap();
        assert!(storage.exists());
        assert_eq!(storage.load().as_deref(), Some("t1"));

        storage.delete().unwrap();
        assert!(!storage.exists());
        assert!(storage.load().is_none());
    }

    #[test]
    fn save_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TokenStorage::new(temp_dir.path().join("nested").join("dir"));
        storage.save("t2").unwrap();
        assert_eq!(storage.load().as_deref(), Some("t2"));
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TokenStorage::new(temp_dir.path());
        storage.ensure_dir().unwrap();
        std::fs::write(storage.path(), "not json").unwrap();
        assert!(storage.load().is_none());
    }
}
