//! Disk-backed cache with time-based expiry.

use chrono::{DateTime, Duration, Utc};
use fincache_config::CacheSettings;
use fincache_core::error::CacheResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "cache";

const ENTRY_SUFFIX: &str = ".json";

/// Stored form of a cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct DiskEntry<T> {
    timestamp: DateTime<Utc>,
    data: T,
}

/// Header-only view used when the payload type is not known.
#[derive(Debug, Deserialize)]
struct EntryHeader {
    timestamp: DateTime<Utc>,
}

/// Key-value cache persisting one JSON file per key.
///
/// Each entry records when it was written; readers pass a maximum age and
/// treat older entries as misses. Unreadable or corrupt entries are misses
/// too, never errors.
#[derive(Debug)]
pub struct ExpiringDiskCache {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl Default for ExpiringDiskCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl ExpiringDiskCache {
    /// Create a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a cache rooted at the configured directory.
    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(&settings.dir)
    }

    /// Get cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the entry for `key`.
    ///
    /// Keys are percent-encoded, so distinct keys always map to distinct files.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}", urlencoding::encode(key), ENTRY_SUFFIX))
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> CacheResult<()> {
        self.write_entry(key, value, Utc::now())
    }

    pub(crate) fn write_entry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        timestamp: DateTime<Utc>,
    ) -> CacheResult<()> {
        let bytes = serde_json::to_vec(&DiskEntry {
            timestamp,
            data: value,
        })?;

        let path = self.entry_path(key);

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        fs::create_dir_all(&self.dir)?;

        // Temp names are unique per write, so other instances sharing the
        // directory never write into the same file.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!("Cached {} at {:?}", key, path);
        Ok(())
    }

    /// Load the value stored under `key`.
    ///
    /// Returns `None` when the entry is missing, cannot be decoded as `T`, or
    /// is older than `max_age`. With `max_age = None` any readable entry hits.
    pub fn get<T: DeserializeOwned>(&self, key: &str, max_age: Option<Duration>) -> Option<T> {
        let entry: DiskEntry<T> = self.read(key)?;

        if let Some(max_age) = max_age {
            let age = Utc::now() - entry.timestamp;
            if age > max_age {
                debug!("Cache entry {} is stale ({}s old)", key, age.num_seconds());
                return None;
            }
        }

        Some(entry.data)
    }

    /// Whether a fresh, readable entry exists for `key`.
    pub fn contains(&self, key: &str, max_age: Option<Duration>) -> bool {
        self.get::<serde::de::IgnoredAny>(key, max_age).is_some()
    }

    /// Age of the entry stored under `key`, if it is readable.
    pub fn entry_age(&self, key: &str) -> Option<Duration> {
        let header: EntryHeader = self.read(key)?;
        Some(Utc::now() - header.timestamp)
    }

    fn read<E: DeserializeOwned>(&self, key: &str) -> Option<E> {
        let path = self.entry_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Cache miss for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Ignoring unreadable cache entry {:?}: {}", path, e);
                None
            }
        }
    }

    /// Remove every cache entry. Other files in the directory are left alone.
    ///
    /// Returns the number of entries removed.
    pub fn clear_all(&self) -> CacheResult<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut removed = 0;

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_entry = path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| n.ends_with(ENTRY_SUFFIX));

            if is_entry {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        debug!("Cleared {} cache entries from {:?}", removed, self.dir);
        Ok(removed)
    }
}
