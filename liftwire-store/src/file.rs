//! JSON file session store.
//!
//! Stores the serialized session in a single JSON file under the platform
//! config directory, created with owner-only permissions on Unix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use liftwire_core::{CoreError, Session, SessionStore};
use tracing::{debug, warn};

use crate::error::StoreError;

/// Returns the default liftwire config directory.
///
/// - macOS: `~/Library/Application Support/liftwire`
/// - Linux: `~/.config/liftwire`
/// - Windows: `%APPDATA%\liftwire`
pub fn default_config_dir() -> Result<PathBuf, StoreError> {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|h| {
                h.join("Library")
                    .join("Application Support")
                    .join("liftwire")
            })
            .ok_or_else(|| StoreError::NoLocation("home directory not found".to_string()))
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
            .map(|c| c.join("liftwire"))
            .ok_or_else(|| StoreError::NoLocation("config directory not found".to_string()))
    }
}

/// Returns the default session file path.
pub fn default_session_path() -> Result<PathBuf, StoreError> {
    Ok(default_config_dir()?.join("session.json"))
}

/// Sets restrictive file permissions (0o600) on Unix systems.
#[cfg(unix)]
async fn set_restrictive_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = tokio::fs::metadata(path).await?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = "0600", "Set restrictive permissions");
    Ok(())
}

#[cfg(not(unix))]
async fn set_restrictive_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Session Store
// ============================================================================

/// Session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store writing to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default platform location.
    pub fn at_default_path() -> Result<Self, StoreError> {
        Ok(Self::new(default_session_path()?))
    }

    /// Returns the path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Option<Session>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let session = serde_json::from_str(&contents)?;
                Ok(Some(session))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        set_restrictive_permissions(&self.path).await?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn remove(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Result<Option<Session>, CoreError> {
        match self.load().await {
            Ok(session) => Ok(session),
            // A corrupt file is treated as logged-out rather than fatal;
            // the next login overwrites it.
            Err(StoreError::Corrupt(e)) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt session file");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, session: Session) -> Result<(), CoreError> {
        self.save(&session).await.map_err(CoreError::from)
    }

    async fn clear(&self) -> Result<(), CoreError> {
        self.remove().await.map_err(CoreError::from)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use liftwire_core::{AuthToken, User};

    fn sample_session() -> Session {
        Session::new(
            AuthToken::bearer("abc", Duration::hours(6)),
            User::minimal("123"),
        )
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert!(store.get().await.unwrap().is_none());

        store.set(sample_session()).await.unwrap();
        let got = store.get().await.unwrap().unwrap();
        assert_eq!(got.user.id, "123");

        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get().await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.set(sample_session()).await.unwrap();

        let mode = tokio::fs::metadata(store.path())
            .await
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
