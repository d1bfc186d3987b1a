use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::CoreError;
use crate::models::catalog::CoinCatalog;

/// Persists the time-stamped coin catalog between runs so the 24-hour
/// TTL survives restarts. Injected for the same reason as
/// [`super::session::SessionStore`].
pub trait CatalogStore: Send + Sync {
    /// The cached catalog, if one was ever saved.
    fn load(&self) -> Result<Option<CoinCatalog>, CoreError>;

    /// Replace the cached catalog.
    fn save(&self, catalog: &CoinCatalog) -> Result<(), CoreError>;
}

/// JSON-file-backed catalog store for native use.
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogStore for FileCatalogStore {
    fn load(&self) -> Result<Option<CoinCatalog>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let catalog: CoinCatalog = serde_json::from_str(&json)?;
        Ok(Some(catalog))
    }

    fn save(&self, catalog: &CoinCatalog) -> Result<(), CoreError> {
        let json = serde_json::to_string(catalog)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory catalog store for tests.
#[derive(Default)]
pub struct MemoryCatalogStore {
    inner: Mutex<Option<CoinCatalog>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load(&self) -> Result<Option<CoinCatalog>, CoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.clone())
    }

    fn save(&self, catalog: &CoinCatalog) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *inner = Some(catalog.clone());
        Ok(())
    }
}
