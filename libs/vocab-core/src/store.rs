//! Persistence of the item collection.
//!
//! The collection is stored as one pretty-printed JSON array. Saves replace
//! the whole file atomically (temp file + rename), so a failed save leaves
//! the previous contents in place.

use crate::error::StoreError;
use crate::types::{Item, ItemStatus, INITIAL_EASE};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;

type Result<T> = std::result::Result<T, StoreError>;

/// Load and save the full item collection.
pub trait ItemStore: Send + Sync {
    /// Load every item, back-filling missing scheduling fields with the
    /// defaults of a fresh item due `today`.
    fn load(&self, today: NaiveDate) -> Result<Vec<Item>>;

    /// Replace the stored collection with `items`, preserving their order.
    fn save(&self, items: &[Item]) -> Result<()>;
}

/// Item as found on disk. Files written by older versions may lack the
/// scheduling fields or use the short legacy names.
#[derive(Debug, Deserialize)]
struct StoredItem {
    id: u64,
    #[serde(alias = "en")]
    form_a: String,
    #[serde(alias = "fr")]
    form_b: String,
    #[serde(default)]
    status: Option<ItemStatus>,
    #[serde(default, alias = "ef")]
    ease_factor: Option<f64>,
    #[serde(default)]
    interval: Option<u32>,
    #[serde(default)]
    repetitions: Option<u32>,
    #[serde(default, alias = "due")]
    due_date: Option<String>,
}

impl StoredItem {
    fn into_item(self, today: NaiveDate) -> Item {
        let due_date = self
            .due_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .unwrap_or(today);

        Item {
            id: self.id,
            form_a: self.form_a,
            form_b: self.form_b,
            status: self.status.unwrap_or_default(),
            ease_factor: self.ease_factor.unwrap_or(INITIAL_EASE),
            interval: self.interval.unwrap_or(0),
            repetitions: self.repetitions.unwrap_or(0),
            due_date,
        }
    }
}

/// Decode a stored collection.
pub fn decode_items(content: &str, today: NaiveDate) -> serde_json::Result<Vec<Item>> {
    let stored: Vec<StoredItem> = serde_json::from_str(content)?;
    Ok(stored.into_iter().map(|s| s.into_item(today)).collect())
}

/// Store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Atomically write content using temp file + rename.
    fn atomic_write(&self, content: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| self.io_error(e))?;
        temp_file.as_file().sync_all().map_err(|e| self.io_error(e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        Ok(())
    }
}

impl ItemStore for JsonFileStore {
    fn load(&self, today: NaiveDate) -> Result<Vec<Item>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no item file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items = decode_items(&content, today).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "loaded items");
        Ok(items)
    }

    fn save(&self, items: &[Item]) -> Result<()> {
        let content = serde_json::to_string_pretty(items).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        self.atomic_write(&content)?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "saved items");
        Ok(())
    }
}

/// In-memory store, mostly for tests. Counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Item>>> {
        self.items
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl ItemStore for MemoryStore {
    fn load(&self, _today: NaiveDate) -> Result<Vec<Item>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, items: &[Item]) -> Result<()> {
        *self.lock()? = items.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
