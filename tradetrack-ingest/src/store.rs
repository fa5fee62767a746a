//! Dataset persistence behind a pluggable store.
//!
//! The last successfully imported dataset is kept under a single fixed key.
//! The pipeline never touches a store itself; callers save only after a parse
//! has succeeded, so a failed import leaves the stored dataset as it was.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tradetrack_core::ParsedDataset;

/// Fixed key the dataset is stored under.
pub const STORAGE_KEY: &str = "tradingData";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("stored dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load / save / clear for the single stored dataset.
pub trait DatasetStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<ParsedDataset>, StoreError>;

    /// Replace whatever is stored.
    fn save(&mut self, dataset: &ParsedDataset) -> Result<(), StoreError>;

    /// Remove the stored dataset. Clearing an empty store is not an error.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// JSON file named after [`STORAGE_KEY`] inside a directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a truncated dataset behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetStore for JsonFileStore {
    fn load(&self) -> Result<Option<ParsedDataset>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, dataset: &ParsedDataset) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(dataset)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!(
            "saved {} trade(s) to {}",
            dataset.trades.len(),
            self.path.display()
        );
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("cleared {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dataset: Option<ParsedDataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetStore for MemoryStore {
    fn load(&self) -> Result<Option<ParsedDataset>, StoreError> {
        Ok(self.dataset.clone())
    }

    fn save(&mut self, dataset: &ParsedDataset) -> Result<(), StoreError> {
        self.dataset = Some(dataset.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.dataset = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradetrack_core::{parse, RawRow};

    fn sample() -> ParsedDataset {
        let rows = vec![
            RawRow::new()
                .with("SYMBOL", "AAPL")
                .with("DateTime", "1/2/24 3:00 PM")
                .with("value", 100.0),
            RawRow::new()
                .with("SYMBOL", "MSFT")
                .with("DateTime", "1/1/24 9:00 AM")
                .with("value", -50.0),
        ];
        parse(&rows, 1000.0).unwrap()
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        assert!(store.load().unwrap().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert!(store.path().ends_with("tradingData.json"));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/deeper"));
        store.save(&sample()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&sample()).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.path(), "not valid json {{{").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn lenient_nan_survives_the_file_store() {
        let rows = vec![RawRow::new()
            .with("SYMBOL", "AAPL")
            .with("DateTime", "1/2/24 3:00 PM")
            .with("value", "n/a")];
        let pipeline = tradetrack_core::Pipeline::new(
            tradetrack_core::ColumnMapping::combined(),
            tradetrack_core::ValuePolicy::Lenient,
        );
        let ds = pipeline.parse(&rows, 10.0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&ds).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.trades[0].value.is_nan());
        assert!(loaded.trades[0].accumulated_value.is_nan());
    }

    #[test]
    fn strict_parse_never_hands_the_store_an_infinity() {
        let rows = vec![RawRow::new()
            .with("SYMBOL", "AAPL")
            .with("DateTime", "1/2/24 3:00 PM")
            .with("value", "1e999")];
        assert_eq!(
            parse(&rows, 10.0),
            Err(tradetrack_core::ParseError::InvalidValue { row: 1 })
        );

        let lenient = tradetrack_core::Pipeline::new(
            tradetrack_core::ColumnMapping::combined(),
            tradetrack_core::ValuePolicy::Lenient,
        );
        let ds = lenient.parse(&rows, 10.0).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save(&ds).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(
            loaded.trades[0].value.is_nan(),
            ds.trades[0].value.is_nan()
        );
        assert!(ds.trades[0].value.is_nan());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap().map(|d| d.trades.len()), Some(2));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
