//! Preference storage
//!
//! Key/value store in two flavors: in-memory (session) and file-persisted
//! (local, tab-separated, one entry per line). Write failures surface as
//! a Result; an unreadable backing file starts the store empty.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Storage backend failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage backend
#[derive(Debug, Default)]
pub struct Storage {
    data: HashMap<String, String>,
    path: Option<PathBuf>,
}

impl Storage {
    /// In-memory storage, dropped with the process
    pub fn session() -> Self {
        Self::default()
    }

    /// File-backed storage; loads existing entries, skipping malformed
    /// lines, and warns (empty store) when the file cannot be read
    pub fn local(path: PathBuf) -> Self {
        let mut data = HashMap::new();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    for line in contents.lines() {
                        if let Some((key, value)) = line.split_once('\t') {
                            data.insert(key.to_string(), value.to_string());
                        }
                    }
                }
                Err(err) => {
                    warn!(%err, path = %path.display(), "storage file unreadable, starting empty")
                }
            }
        }
        Self {
            data,
            path: Some(path),
        }
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }

    pub fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.insert(key.to_string(), value.to_string());
        self.persist()
    }

    pub fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.data.remove(key);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.data.clear();
        self.persist()
    }

    pub fn length(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        if let Some(path) = &self.path {
            let contents: String = self
                .data
                .iter()
                .map(|(k, v)| format!("{k}\t{v}"))
                .collect::<Vec<_>>()
                .join("\n");
            fs::write(path, contents)?;
        }
        Ok(())
    }
}
