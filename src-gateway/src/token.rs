//! Persistence of the bearer token
//!
//! The token is the only durable client state: written on login, removed on
//! logout, read back before every gateway call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Failed to read token file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write token file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to remove token file {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Env(#[from] deboard_env::EnvError),
}

/// Durable storage of the authentication token
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Current token; `Ok(None)` when nobody is logged in
    fn load(&self) -> Result<Option<String>, TokenStoreError>;
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;
    /// Remove the token; clearing an empty store is not an error
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token kept in a single file, `<state dir>/token` by default
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the location resolved from `DEBOARD_DIR` / `HOME`
    pub fn from_env() -> Result<Self, TokenStoreError> {
        Ok(Self::new(deboard_env::get_token_path()?))
    }

    /// Store inside an explicit state directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(deboard_env::constants::TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TokenStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let write_err = |source: io::Error| TokenStoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, token).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        log::debug!("token saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenStoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Process-local store, for tests and one-shot sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_lifecycle() {
        let tmp = TempDir::new().unwrap();
        let store = FileTokenStore::in_dir(tmp.path());

        assert_eq!(store.load().unwrap(), None);
        store.save("abc.def").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // idempotent
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_creates_parent_and_trims() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("token");
        let store = FileTokenStore::new(&path);
        store.save("tok").unwrap();
        assert!(path.exists());

        fs::write(&path, "  tok2\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok2"));

        fs::write(&path, "\n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_private_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let store = FileTokenStore::in_dir(tmp.path());
        store.save("secret").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("t");
        assert_eq!(store.load().unwrap().as_deref(), Some("t"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
