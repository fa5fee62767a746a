//! Import flow: decode a file, run the pipeline, optionally persist.
//!
//! Decoding and parsing finish before any store is touched, so a file that
//! fails at any stage leaves the previously stored dataset untouched.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tradetrack_core::{ParsedDataset, Pipeline};

use crate::decode::decode_file;
use crate::error::IngestError;
use crate::store::DatasetStore;

/// What happened during one import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub source: PathBuf,
    pub format: String,
    /// Non-blank rows produced by the decoder.
    pub rows_decoded: usize,
    pub trades: usize,
    /// Rows dropped for having a blank symbol.
    pub rows_dropped: usize,
    pub final_value: f64,
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub dataset: ParsedDataset,
    pub report: ImportReport,
}

/// Decode and parse `path` without persisting anything.
pub fn import_file(
    path: &Path,
    pipeline: &Pipeline,
    initial_investment: f64,
) -> Result<ImportOutcome, IngestError> {
    let (format, rows) = decode_file(path)?;
    let dataset = pipeline.parse(&rows, initial_investment)?;

    let report = ImportReport {
        source: path.to_path_buf(),
        format: format!("{format:?}").to_lowercase(),
        rows_decoded: rows.len(),
        trades: dataset.trades.len(),
        rows_dropped: rows.len() - dataset.trades.len(),
        final_value: dataset.final_value(),
    };
    log::info!(
        "imported {} trade(s) from {} ({} row(s) dropped)",
        report.trades,
        path.display(),
        report.rows_dropped
    );

    Ok(ImportOutcome { dataset, report })
}

/// [`import_file`], then replace the stored dataset on success.
pub fn import_into_store(
    store: &mut dyn DatasetStore,
    path: &Path,
    pipeline: &Pipeline,
    initial_investment: f64,
) -> Result<ImportOutcome, IngestError> {
    let outcome = import_file(path, pipeline, initial_investment)?;
    store.save(&outcome.dataset)?;
    Ok(outcome)
}
