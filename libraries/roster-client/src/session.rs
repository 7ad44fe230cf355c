//! Auth token storage.
//!
//! A [`Session`] is the explicit holder of the current token. The client
//! reads it before every request and writes it on login/logout; where the
//! token lives is decided by the [`TokenStore`] behind it.

use crate::error::{ClientError, Result};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Backing storage for the auth token.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Current token, if one is stored.
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    /// Forget the token. Removing an absent token is not an error.
    fn remove(&self) -> Result<()>;
}

/// Token kept in process memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        Ok(token.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        Ok(())
    }
}

/// Token persisted in a file so it survives between CLI invocations.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Session(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ClientError::Session(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }
        std::fs::write(&self.path, token).map_err(|e| {
            ClientError::Session(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Explicit session context shared by the client and its callers.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileTokenStore::new(path)))
    }

    /// Current token. Unreadable storage and a blank token count as "no token".
    pub fn get(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    pub fn set(&self, token: &str) -> Result<()> {
        self.store.save(token)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove()
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}
