//! Errors from the ingest layer.

use std::path::PathBuf;
use thiserror::Error;
use tradetrack_core::ParseError;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file '{0}', expected .xlsx, .xls, .ods or .csv")]
    UnsupportedExtension(String),

    #[error("error reading file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
