//! Pipeline error taxonomy.
//!
//! Every variant is fatal to the current parse: there is no partial
//! ingestion, and nothing is retried internally.

use thiserror::Error;

/// Errors produced while turning raw rows into a [`ParsedDataset`].
///
/// Row numbers are 1-based positions among the rows that survived the
/// blank-symbol filter, i.e. the id the offending trade would have received.
///
/// [`ParsedDataset`]: crate::domain::ParsedDataset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("no data found in spreadsheet")]
    EmptyInput,

    #[error("required column '{0}' not found in spreadsheet")]
    MissingColumn(String),

    #[error("no valid trades found after filtering empty symbols")]
    NoValidTrades,

    #[error("invalid date format in row {row}, expected M/D/YY H:MM AM/PM")]
    InvalidDateFormat { row: usize },

    #[error("invalid hour format in row {row}")]
    InvalidHour { row: usize },

    #[error("invalid trade value in row {row}, expected a number")]
    InvalidValue { row: usize },

    #[error("initial investment must be a finite number, got {0}")]
    InvalidInitialInvestment(f64),
}

impl ParseError {
    /// Row number the error points at, if it is tied to a single row.
    pub fn row(&self) -> Option<usize> {
        match self {
            ParseError::InvalidDateFormat { row }
            | ParseError::InvalidHour { row }
            | ParseError::InvalidValue { row } => Some(*row),
            _ => None,
        }
    }
}
