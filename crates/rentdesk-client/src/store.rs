//! On-disk session store.
//!
//! Holds exactly two records: the session token and a cached profile blob.
//!
//! # Store Structure
//!
//! ```text
//! ~/.rentdesk/session/
//!   token.json      # { "token": "...", "savedAt": "..." }
//!   profile.json    # cached user/tenant profile record
//! ```
//!
//! Writes are atomic (temp file + rename). Corrupt or missing files read as
//! "no session" rather than erroring: the store must never block startup.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

const TOKEN_FILE: &str = "token.json";
const PROFILE_FILE: &str = "profile.json";

/// Persisted token record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenRecord {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Session store for the token and profile blob.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store at the default location.
    ///
    /// Default: `~/.rentdesk/session`
    pub fn new() -> ApiResult<Self> {
        let base = dirs::home_dir().ok_or_else(|| ApiError::Store {
            message: "could not determine home directory".to_string(),
        })?;
        Ok(Self {
            dir: base.join(".rentdesk").join("session"),
        })
    }

    /// Create a store with a custom directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the stored token, if any.
    ///
    /// Missing or corrupt files read as `None`.
    pub async fn load_token(&self) -> Option<String> {
        let path = self.dir.join(TOKEN_FILE);
        let raw = fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str::<TokenRecord>(&raw) {
            Ok(record) if !record.token.is_empty() => Some(record.token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "corrupt token record, ignoring");
                None
            }
        }
    }

    /// Persist the token.
    pub async fn save_token(&self, token: &str) -> ApiResult<()> {
        let record = TokenRecord {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record).map_err(|e| ApiError::Store {
            message: format!("failed to serialize token record: {}", e),
        })?;
        self.write_atomic(TOKEN_FILE, &json).await?;
        debug!("token persisted");
        Ok(())
    }

    /// Load the cached profile blob, if any.
    ///
    /// Missing or corrupt files read as `None`.
    pub async fn load_profile<T: DeserializeOwned>(&self) -> Option<T> {
        let path = self.dir.join(PROFILE_FILE);
        let raw = fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "corrupt profile record, ignoring");
                None
            }
        }
    }

    /// Persist the profile blob.
    pub async fn save_profile<T: Serialize>(&self, profile: &T) -> ApiResult<()> {
        let json = serde_json::to_string_pretty(profile).map_err(|e| ApiError::Store {
            message: format!("failed to serialize profile: {}", e),
        })?;
        self.write_atomic(PROFILE_FILE, &json).await?;
        debug!("profile persisted");
        Ok(())
    }

    /// Remove both records (logout).
    pub async fn clear(&self) -> ApiResult<()> {
        for file in [TOKEN_FILE, PROFILE_FILE] {
            let path = self.dir.join(file);
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ApiError::Store {
                        message: format!("failed to remove {}: {}", file, e),
                    })
                }
            }
        }
        debug!("session store cleared");
        Ok(())
    }

    async fn write_atomic(&self, file: &str, content: &str) -> ApiResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ApiError::Store {
                message: format!("failed to create store directory: {}", e),
            })?;

        let path = self.dir.join(file);
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, content)
            .await
            .map_err(|e| ApiError::Store {
                message: format!("failed to write temp file: {}", e),
            })?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| ApiError::Store {
                message: format!("failed to rename temp file: {}", e),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::with_dir(temp_dir.path().join("session"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let (store, _temp_dir) = create_test_store();

        assert!(store.load_token().await.is_none());

        store.save_token("abc123").await.unwrap();
        assert_eq!(store.load_token().await, Some("abc123".to_string()));
    }

    #[tokio::test]
    async fn test_empty_token_reads_as_none() {
        let (store, _temp_dir) = create_test_store();
        store.save_token("").await.unwrap();
        assert!(store.load_token().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_token_reads_as_none() {
        let (store, _temp_dir) = create_test_store();
        store.save_token("abc123").await.unwrap();

        fs::write(store.dir().join(TOKEN_FILE), "not json{{{")
            .await
            .unwrap();

        assert!(store.load_token().await.is_none());
    }

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let (store, _temp_dir) = create_test_store();

        let profile = serde_json::json!({ "id": "u1", "firstName": "Jane" });
        store.save_profile(&profile).await.unwrap();

        let loaded: serde_json::Value = store.load_profile().await.unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_clear_removes_both_records() {
        let (store, _temp_dir) = create_test_store();

        store.save_token("abc123").await.unwrap();
        store
            .save_profile(&serde_json::json!({ "id": "u1" }))
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(store.load_token().await.is_none());
        assert!(store.load_profile::<serde_json::Value>().await.is_none());

        // Clearing an already-empty store is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_no_temp_files_remain() {
        let (store, _temp_dir) = create_test_store();
        store.save_token("abc123").await.unwrap();

        let mut entries = fs::read_dir(store.dir()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name();
            assert!(
                !name.to_string_lossy().ends_with(".tmp"),
                "temp file should not remain: {:?}",
                name
            );
        }
    }
}
