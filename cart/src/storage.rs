//! Cart persistence backends

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::cart::CartEntry;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cart serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable client-local storage for cart entries.
///
/// Only the entries are persisted; the total is derived on load.
pub trait CartStorage {
    fn load(&self) -> Result<Vec<CartEntry>, CartError>;
    fn save(&self, entries: &[CartEntry]) -> Result<(), CartError>;
}

/// JSON file storage, the local-storage analog for native clients.
///
/// No cross-process coordination: concurrent writers overwrite each other,
/// last write wins.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartEntry>, CartError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, entries: &[CartEntry]) -> Result<(), CartError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory storage for tests
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<Vec<CartEntry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of what has been persisted so far
    pub fn persisted(&self) -> Vec<CartEntry> {
        self.entries.borrow().clone()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<CartEntry>, CartError> {
        Ok(self.entries.borrow().clone())
    }

    fn save(&self, entries: &[CartEntry]) -> Result<(), CartError> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}
