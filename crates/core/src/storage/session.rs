use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::CoreError;

/// Persists the remembered portfolio identifier across restarts.
///
/// Injected rather than accessed ambiently so the shell can be driven
/// against an in-memory fake in tests. No validation happens here —
/// that is the identity resolver's job.
pub trait SessionStore: Send + Sync {
    /// Persist an identifier for later retrieval, replacing any previous one.
    fn save(&self, id: &str) -> Result<(), CoreError>;

    /// The previously saved identifier, if any.
    fn load(&self) -> Result<Option<String>, CoreError>;

    /// Forget the saved identifier. A no-op when nothing is saved.
    fn clear(&self) -> Result<(), CoreError>;
}

#[derive(Serialize, Deserialize)]
struct SavedSession {
    #[serde(rename = "portfolioId")]
    portfolio_id: String,
}

/// JSON-file-backed session store for native use.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, id: &str) -> Result<(), CoreError> {
        let json = serde_json::to_string(&SavedSession {
            portfolio_id: id.to_string(),
        })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let saved: SavedSession = serde_json::from_str(&json)?;
        Ok(Some(saved.portfolio_id))
    }

    fn clear(&self) -> Result<(), CoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory session store for tests and embedders with their own
/// persistence.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, id: &str) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *inner = Some(id.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, CoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.clone())
    }

    fn clear(&self) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *inner = None;
        Ok(())
    }
}
