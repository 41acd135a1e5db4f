//! Session flags that survive a restart.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 SessionStore                  │
//! │   - read once when the guide starts           │
//! │   - saved by the guide on every flag toggle   │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │                StorageBackend                 │
//! │   - MemoryStorage: in-process only            │
//! │   - FileStorage: JSON file (state-persistence)│
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Save returns error; load falls back to defaults |
//! | `StorageError::Serialization` | JSON encode/decode | Same as `Io` |
//! | `StorageError::Corruption` | Unknown entry version or bad payload | Defaults used, logged |
//! | Missing entry | First run | Defaults used |

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from session storage.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    /// JSON encode/decode failure.
    #[cfg(feature = "state-persistence")]
    Serialization(String),
    /// Stored data has an unexpected shape.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "state-persistence")]
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            #[cfg(feature = "state-persistence")]
            StorageError::Serialization(_) => None,
            StorageError::Corruption(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Storage Backend
// ─────────────────────────────────────────────────────────────────────────────

/// A versioned, opaque stored value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredEntry {
    pub key: String,
    pub version: u32,
    pub data: Vec<u8>,
}

/// Pluggable key/value storage.
///
/// `save_all` replaces everything; file-backed implementations write
/// atomically.
pub trait StorageBackend: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &str;

    /// All entries; empty on first run.
    fn load_all(&self) -> StorageResult<HashMap<String, StoredEntry>>;

    /// Replace all entries.
    fn save_all(&self, entries: &HashMap<String, StoredEntry>) -> StorageResult<()>;

    /// Remove everything.
    fn clear(&self) -> StorageResult<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load_all(&self) -> StorageResult<HashMap<String, StoredEntry>> {
        (**self).load_all()
    }

    fn save_all(&self, entries: &HashMap<String, StoredEntry>) -> StorageResult<()> {
        (**self).save_all(entries)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }
}

/// In-memory storage, lost on exit.
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage.
    #[must_use]
    pub fn with_entries(entries: HashMap<String, StoredEntry>) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load_all(&self) -> StorageResult<HashMap<String, StoredEntry>> {
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save_all(&self, entries: &HashMap<String, StoredEntry>) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        *guard = entries.clone();
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?
            .clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryStorage")
            .field("entries", &count)
            .finish()
    }
}

#[cfg(feature = "state-persistence")]
mod file_storage {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Serialize};
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    #[derive(Serialize, Deserialize)]
    struct SessionFile {
        format_version: u32,
        entries: HashMap<String, FileEntry>,
    }

    #[derive(Serialize, Deserialize)]
    struct FileEntry {
        version: u32,
        data_base64: String,
    }

    impl SessionFile {
        const FORMAT_VERSION: u32 = 1;
    }

    /// JSON file storage with write-then-rename saves.
    ///
    /// ```json
    /// {
    ///   "format_version": 1,
    ///   "entries": {
    ///     "vibeguide::session": { "version": 1, "data_base64": "AQ==" }
    ///   }
    /// }
    /// ```
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// Storage at `path`; the file is created on first save.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// `$XDG_STATE_HOME/vibeguide/session.json`, falling back to
        /// `~/.local/state` and then the working directory.
        #[must_use]
        pub fn default_location() -> Self {
            let base = std::env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    std::env::var("HOME")
                        .map(|home| PathBuf::from(home).join(".local").join("state"))
                })
                .unwrap_or_else(|_| PathBuf::from("."));
            Self::new(base.join("vibeguide").join("session.json"))
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
    }

    impl StorageBackend for FileStorage {
        fn name(&self) -> &str {
            "FileStorage"
        }

        fn load_all(&self) -> StorageResult<HashMap<String, StoredEntry>> {
            if !self.path.exists() {
                return Ok(HashMap::new());
            }
            let reader = BufReader::new(File::open(&self.path)?);
            let file: SessionFile = serde_json::from_reader(reader).map_err(|e| {
                StorageError::Serialization(format!("failed to parse session file: {e}"))
            })?;
            if file.format_version != SessionFile::FORMAT_VERSION {
                tracing::warn!(
                    stored = file.format_version,
                    expected = SessionFile::FORMAT_VERSION,
                    "session file format version mismatch, ignoring"
                );
                return Ok(HashMap::new());
            }

            let mut entries = HashMap::with_capacity(file.entries.len());
            for (key, entry) in file.entries {
                match STANDARD.decode(&entry.data_base64) {
                    Ok(data) => {
                        entries.insert(
                            key.clone(),
                            StoredEntry {
                                key,
                                version: entry.version,
                                data,
                            },
                        );
                    }
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "undecodable session entry, skipping");
                    }
                }
            }
            Ok(entries)
        }

        fn save_all(&self, entries: &HashMap<String, StoredEntry>) -> StorageResult<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = SessionFile {
                format_version: SessionFile::FORMAT_VERSION,
                entries: entries
                    .iter()
                    .map(|(key, entry)| {
                        (
                            key.clone(),
                            FileEntry {
                                version: entry.version,
                                data_base64: STANDARD.encode(&entry.data),
                            },
                        )
                    })
                    .collect(),
            };

            let tmp_path = self.temp_path();
            {
                let mut writer = BufWriter::new(File::create(&tmp_path)?);
                serde_json::to_writer_pretty(&mut writer, &file).map_err(|e| {
                    StorageError::Serialization(format!("failed to serialize session: {e}"))
                })?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp_path, &self.path)?;

            tracing::debug!(path = %self.path.display(), entries = entries.len(), "saved session");
            Ok(())
        }

        fn clear(&self) -> StorageResult<()> {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            Ok(())
        }
    }

    impl fmt::Debug for FileStorage {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStorage").field("path", &self.path).finish()
        }
    }
}

#[cfg(feature = "state-persistence")]
pub use file_storage::FileStorage;

// ─────────────────────────────────────────────────────────────────────────────
// Session Flags
// ─────────────────────────────────────────────────────────────────────────────

/// Per-session toggles, read once when the guide starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionFlags {
    /// Pad the top of the grid with blank rows.
    pub include_leading_blank_rows: bool,
    /// Drop mature streams before layout.
    pub hide_mature: bool,
}

impl SessionFlags {
    const KEY: &'static str = "vibeguide::session";
    const VERSION: u32 = 1;
    const LEADING_BLANK_ROWS: u8 = 0b01;
    const HIDE_MATURE: u8 = 0b10;

    fn encode(&self) -> Vec<u8> {
        let mut bits = 0u8;
        if self.include_leading_blank_rows {
            bits |= Self::LEADING_BLANK_ROWS;
        }
        if self.hide_mature {
            bits |= Self::HIDE_MATURE;
        }
        vec![bits]
    }

    fn decode(entry: &StoredEntry) -> StorageResult<Self> {
        if entry.version != Self::VERSION {
            return Err(StorageError::Corruption(format!(
                "unsupported session version {}",
                entry.version
            )));
        }
        match entry.data.as_slice() {
            [bits] if bits & !(Self::LEADING_BLANK_ROWS | Self::HIDE_MATURE) == 0 => Ok(Self {
                include_leading_blank_rows: bits & Self::LEADING_BLANK_ROWS != 0,
                hide_mature: bits & Self::HIDE_MATURE != 0,
            }),
            _ => Err(StorageError::Corruption("malformed session flags".into())),
        }
    }
}

/// Reads and writes [`SessionFlags`] through a backend.
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
}

impl SessionStore {
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Ephemeral store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// File-backed store at `path`.
    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn with_file(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(Box::new(FileStorage::new(path)))
    }

    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Stored flags, or defaults when absent or unreadable.
    #[must_use]
    pub fn load(&self) -> SessionFlags {
        match self.try_load() {
            Ok(flags) => flags,
            Err(error) => {
                tracing::warn!(backend = %self.backend.name(), %error, "using default session flags");
                SessionFlags::default()
            }
        }
    }

    /// Stored flags; `Ok(default)` on first run.
    pub fn try_load(&self) -> StorageResult<SessionFlags> {
        let entries = self.backend.load_all()?;
        match entries.get(SessionFlags::KEY) {
            Some(entry) => SessionFlags::decode(entry),
            None => Ok(SessionFlags::default()),
        }
    }

    /// Persist `flags`, keeping unrelated entries.
    pub fn save(&self, flags: &SessionFlags) -> StorageResult<()> {
        let mut entries = self.backend.load_all().unwrap_or_default();
        entries.insert(
            SessionFlags::KEY.to_string(),
            StoredEntry {
                key: SessionFlags::KEY.to_string(),
                version: SessionFlags::VERSION,
                data: flags.encode(),
            },
        );
        self.backend.save_all(&entries)?;
        tracing::debug!(backend = %self.backend.name(), ?flags, "saved session flags");
        Ok(())
    }

    /// Forget stored flags.
    pub fn clear(&self) -> StorageResult<()> {
        self.backend.clear()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}
