//! Per-scope repository cache under `~/.cache/sesh/github/<scope>.json`.
//!
//! Caching is best-effort: unreadable, corrupt or expired files read as a
//! miss, and write failures are logged instead of returned.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use crate::home::Home;
use crate::model::{CacheEntry, RemoteRepo};

/// Repository list cache keyed by scope name
pub trait RepoCache {
    /// Cached repositories for a scope, or `None` when absent, unreadable or expired
    fn get(&self, scope: &str) -> Option<Vec<RemoteRepo>>;

    /// Store repositories for a scope, valid for `timeout_minutes`
    fn set(&self, scope: &str, repos: &[RemoteRepo], timeout_minutes: u32);

    /// Directory holding the cache files
    fn cache_path(&self) -> PathBuf;
}

/// A cached scope as shown by `sesh cache info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFileInfo {
    pub scope: String,
    pub modified: DateTime<Local>,
}

/// JSON file cache
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Cache rooted at `<home>/.cache/sesh/github`
    pub fn new(home: &dyn Home) -> Result<Self> {
        let root = home.home_dir()?.join(".cache").join("sesh").join("github");
        Ok(Self { root })
    }

    /// Cache rooted at an arbitrary directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, scope: &str) -> PathBuf {
        self.root.join(format!("{}.json", scope))
    }

    fn cache_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read cache directory: {:?}", self.root))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Remove every cache file. A missing cache directory is not an error.
    /// Returns the number of files removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let files = self.cache_files()?;
        for path in &files {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove cache file {:?}", path))?;
        }

        debug!(removed = files.len(), "GitHub cache cleared");
        Ok(files.len())
    }

    /// Cached scopes with their modification time
    pub fn entries(&self) -> Result<Vec<CacheFileInfo>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut infos = Vec::new();
        for path in self.cache_files()? {
            let Some(scope) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .with_context(|| format!("Failed to stat cache file {:?}", path))?;
            infos.push(CacheFileInfo {
                scope: scope.to_string(),
                modified: DateTime::<Local>::from(modified),
            });
        }
        Ok(infos)
    }

    fn read_entry(path: &Path) -> Option<CacheEntry> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cache file");
                return None;
            }
        };

        match serde_json::from_str(&data) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse cache file");
                None
            }
        }
    }
}

impl RepoCache for FileCache {
    fn get(&self, scope: &str) -> Option<Vec<RemoteRepo>> {
        let entry = Self::read_entry(&self.file_path(scope))?;

        if entry.is_expired(Utc::now()) {
            debug!(scope, expired_at = %entry.expires_at, "Cache expired");
            return None;
        }

        debug!(scope, repos = entry.repos.len(), "Cache hit");
        Some(entry.repos)
    }

    fn set(&self, scope: &str, repos: &[RemoteRepo], timeout_minutes: u32) {
        if let Err(e) = fs::create_dir_all(&self.root) {
            error!(path = %self.root.display(), error = %e, "Failed to create cache directory");
            return;
        }

        let entry = CacheEntry::new(repos.to_vec(), Utc::now(), timeout_minutes);
        let data = match serde_json::to_string_pretty(&entry) {
            Ok(data) => data,
            Err(e) => {
                error!(error = %e, "Failed to serialize cache");
                return;
            }
        };

        let path = self.file_path(scope);
        if let Err(e) = fs::write(&path, data) {
            error!(path = %path.display(), error = %e, "Failed to write cache file");
            return;
        }

        debug!(scope, repos = repos.len(), expires_at = %entry.expires_at, "Cache updated");
    }

    fn cache_path(&self) -> PathBuf {
        self.root.clone()
    }
}
