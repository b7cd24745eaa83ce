use super::{ApiError, ApiResult, KatalonApi};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Loaded projects keyed by absolute path
///
/// Entries live until evicted; nothing expires on its own. Share one instance
/// between request handlers instead of analyzing a project per request.
#[derive(Default)]
pub struct AnalyzerCache {
    entries: Mutex<HashMap<PathBuf, Arc<KatalonApi>>>,
}

impl AnalyzerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached facade for `path`, analyzing the project on first use
    pub fn get_or_open(&self, path: &Path) -> ApiResult<Arc<KatalonApi>> {
        let key = normalize(path)?;

        if let Some(api) = self.lock()?.get(&key) {
            debug!("Cache hit for {}", key.display());
            return Ok(Arc::clone(api));
        }

        // Analyze without holding the lock; a racing open of the same path
        // keeps whichever instance was stored first
        debug!("Cache miss for {}", key.display());
        let api = Arc::new(KatalonApi::open(&key)?);
        let mut entries = self.lock()?;
        Ok(Arc::clone(entries.entry(key).or_insert(api)))
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the entry for `path`, returning whether one existed
    pub fn evict(&self, path: &Path) -> ApiResult<bool> {
        let key = normalize(path)?;
        Ok(self.lock()?.remove(&key).is_some())
    }

    pub fn clear(&self) -> ApiResult<()> {
        self.lock()?.clear();
        Ok(())
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, HashMap<PathBuf, Arc<KatalonApi>>>> {
        self.entries
            .lock()
            .map_err(|_| ApiError::server("analyzer cache lock poisoned"))
    }
}

/// Absolute form of `path`; symlinks and `..` are resolved when the path exists
fn normalize(path: &Path) -> ApiResult<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| ApiError::server(format!("Cannot resolve current directory: {}", e)))
}
