#![forbid(unsafe_code)]

//! Key-value persistence for the panel settings record.
//!
//! # Architecture
//!
//! ```text
//! PanelSession ──get/set──▶ KeyValueStore
//!                             ├─ MemoryStore: in-process map (tests, ephemeral)
//!                             └─ FileStore:   one JSON file, atomic rewrite
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Returned; session logs and keeps running |
//! | `StorageError::Serialization` | Store file is not valid JSON | Returned from reads and writes |
//! | `StorageError::Corruption` | Poisoned lock, wrong file format version | Returned |
//! | Missing key | First run | `Ok(None)` |
//!
//! Values are opaque strings; interpreting them is the caller's job.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Store contents could not be encoded or decoded.
    Serialization(String),
    /// Store is in an invalid state.
    Corruption(String),
    /// Backend cannot be used (read-only location, missing directory).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(_)
            | StorageError::Corruption(_)
            | StorageError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store, the persistence seam of the panel session.
///
/// Implementations must be `Send + Sync` so a session can be moved to (or
/// shared with) another thread.
pub trait KeyValueStore: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Value stored under `key`, `None` on first run.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Drop `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check if the backend is available and functional.
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of stored keys (0 if the lock is poisoned).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().map(|g| g.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.remove(key);
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct StoreFile {
    format_version: u32,
    entries: BTreeMap<String, String>,
}

impl StoreFile {
    const FORMAT_VERSION: u32 = 1;

    fn new(entries: BTreeMap<String, String>) -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            entries,
        }
    }
}

/// File-backed store holding every key in one JSON document.
///
/// # File Format
///
/// ```json
/// {
///   "format_version": 1,
///   "entries": {
///     "panel_settings": "{\"enabled\":true,...}"
///   }
/// }
/// ```
///
/// Every write rewrites the whole file through `{path}.tmp` followed by a
/// rename, so a crash mid-write leaves the previous contents intact.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at `$XDG_STATE_HOME/dockpane/{app_name}/store.json`, falling
    /// back to `~/.local/state` and then the current directory.
    #[must_use]
    pub fn default_for_app(app_name: &str) -> Self {
        let path = state_dir()
            .join("dockpane")
            .join(app_name)
            .join("store.json");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let file: StoreFile = serde_json::from_reader(reader).map_err(|e| {
            StorageError::Serialization(format!("failed to parse store file: {e}"))
        })?;
        if file.format_version != StoreFile::FORMAT_VERSION {
            return Err(StorageError::Corruption(format!(
                "store format version {} (expected {})",
                file.format_version,
                StoreFile::FORMAT_VERSION
            )));
        }
        Ok(file.entries)
    }

    fn save(&self, entries: BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let count = entries.len();
        let file = StoreFile::new(entries);
        let tmp_path = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, &file).map_err(|e| {
                StorageError::Serialization(format!("failed to serialize store: {e}"))
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = count,
            "saved key-value store"
        );
        Ok(())
    }
}

fn state_dir() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(state_home);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("state");
    }
    PathBuf::from(".")
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(entries)
    }

    fn is_available(&self) -> bool {
        let Some(parent) = self.path.parent() else {
            return false;
        };
        if !parent.exists() {
            return fs::create_dir_all(parent).is_ok();
        }
        let probe = parent.join(".dockpane_probe");
        if fs::write(&probe, b"probe").is_ok() {
            let _ = fs::remove_file(&probe);
            return true;
        }
        false
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_basic_operations() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_with_entries() {
        let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        assert_eq!(store.name(), "MemoryStore");
    }

    #[test]
    fn storage_error_display() {
        let io = StorageError::from(std::io::Error::other("disk full"));
        assert!(io.to_string().contains("disk full"));
        assert!(std::error::Error::source(&io).is_some());

        let corrupt = StorageError::Corruption("bad".into());
        assert_eq!(corrupt.to_string(), "storage corruption: bad");
        assert!(std::error::Error::source(&corrupt).is_none());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::new(&path);

        store.set("panel_settings", r#"{"enabled":true}"#).unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("panel_settings").unwrap().as_deref(),
            Some(r#"{"enabled":true}"#)
        );
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        assert!(!dir.path().join("store.json.tmp").exists());
    }

    #[test]
    fn file_store_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("panel_settings").unwrap(), None);
        store.remove("panel_settings").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");
        let store = FileStore::new(&path);
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_store_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("k"),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn file_store_rejects_unknown_format_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"format_version":9,"entries":{}}"#).unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(StorageError::Corruption(_))));
    }

    #[test]
    fn file_store_is_available_in_temp_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        assert!(store.is_available());
    }

    #[test]
    fn boxed_store_delegates() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.name(), "MemoryStore");
    }
}
