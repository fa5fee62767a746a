//! TradeTrack Ingest — file decoding, import flow, persistence and export.
//!
//! This crate wraps `tradetrack-core` with everything that touches disk:
//! - Spreadsheet decoding (xlsx/xls/ods via calamine, csv)
//! - Import flow with an import report
//! - Dataset persistence behind the `DatasetStore` trait
//! - CSV / JSON / Markdown export
//! - `tradetrack.toml` configuration

pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod import;
pub mod store;

pub use config::{ConfigError, TradeTrackConfig};
pub use decode::{decode_bytes, decode_csv, decode_file, decode_workbook, SourceFormat};
pub use error::IngestError;
pub use export::{export_dataset, format_money, generate_report, ExportPaths};
pub use import::{import_file, import_into_store, ImportOutcome, ImportReport};
pub use store::{DatasetStore, JsonFileStore, MemoryStore, StoreError, STORAGE_KEY};
