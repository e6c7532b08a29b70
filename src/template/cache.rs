//! Read-through view cache
//!
//! Disabled by default. When enabled, a file is read once and served from
//! memory until [`ViewCache::clear`] is called, so edits on disk are not
//! seen before the next reload.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct ViewCache {
    enabled: bool,
    entries: Mutex<HashMap<PathBuf, Arc<str>>>,
}

impl ViewCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Read `path`, going through the cache when enabled
    pub fn read(&self, path: &Path) -> io::Result<Arc<str>> {
        if !self.enabled {
            return std::fs::read_to_string(path).map(Arc::from);
        }

        if let Some(hit) = self.lock().get(path) {
            return Ok(Arc::clone(hit));
        }

        // Read outside the lock; a racing reader just stores the same content
        let content: Arc<str> = Arc::from(std::fs::read_to_string(path)?);
        self.lock()
            .insert(path.to_path_buf(), Arc::clone(&content));
        Ok(content)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<str>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
