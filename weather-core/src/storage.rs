//! Local cache file and the offline flag.
//!
//! The offline flag is a standalone toggle: saving and retrieving always go
//! to the local file regardless of its value.

use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::config::StorageConfig;

#[derive(Debug, Clone)]
pub struct CloudStorage {
    credentials: String,
    cache_file: PathBuf,
    offline: bool,
}

impl CloudStorage {
    pub fn new(credentials: impl Into<String>, cache_file: impl Into<PathBuf>) -> Self {
        Self {
            credentials: credentials.into(),
            cache_file: cache_file.into(),
            offline: false,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        let mut storage = Self::new(config.credentials.clone(), config.cache_file.clone());
        storage.offline = config.offline;
        storage
    }

    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    pub fn has_credentials(&self) -> bool {
        !self.credentials.is_empty()
    }

    /// Overwrite the cache file with `data`.
    pub fn save_locally(&self, data: &str) -> Result<()> {
        fs::write(&self.cache_file, data).with_context(|| {
            format!("Failed to write local cache: {}", self.cache_file.display())
        })?;
        debug!(path = %self.cache_file.display(), offline = self.offline, "saved locally");
        Ok(())
    }

    /// Whole contents of the cache file; empty if it does not exist yet.
    pub fn retrieve_locally(&self) -> Result<String> {
        match fs::read_to_string(&self.cache_file) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.cache_file.display(), "no local cache yet");
                Ok(String::new())
            }
            Err(err) => Err(err).with_context(|| {
                format!("Failed to read local cache: {}", self.cache_file.display())
            }),
        }
    }

    pub fn set_offline_mode(&mut self, offline: bool) {
        debug!(offline, "offline mode set");
        self.offline = offline;
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Flip the offline flag and return its new value.
    pub fn toggle_offline(&mut self) -> bool {
        self.set_offline_mode(!self.offline);
        self.offline
    }
}
