//! Row validation and normalization.
//!
//! Turns decoded rows into unaccumulated [`Trade`]s in filtered input order:
//! 1. Reject an empty row sequence
//! 2. Check the first row's headers against the column mapping
//! 3. Drop rows with a blank symbol (not an error, does not consume an id)
//! 4. Parse timestamp and value for every remaining row
//!
//! Any failure in step 4 aborts the whole parse.

use serde::{Deserialize, Serialize};

use crate::columns::ColumnMapping;
use crate::datetime::{parse_combined, parse_split};
use crate::domain::{RawCell, RawRow, Trade};
use crate::error::ParseError;

/// What to do with a value cell that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Fail the parse with [`ParseError::InvalidValue`]. Infinite values
    /// count as invalid too.
    #[default]
    Strict,
    /// Keep NaN in the trade (infinities are stored as NaN). Every later
    /// accumulated value becomes NaN too.
    Lenient,
}

/// Validate rows and build unaccumulated trades.
pub fn normalize_rows(
    rows: &[RawRow],
    mapping: &ColumnMapping,
    policy: ValuePolicy,
) -> Result<Vec<Trade>, ParseError> {
    let first = rows.first().ok_or(ParseError::EmptyInput)?;
    check_schema(first, mapping)?;

    let kept: Vec<&RawRow> = rows
        .iter()
        .filter(|row| has_symbol(row, &mapping.symbol_column))
        .collect();

    let dropped = rows.len() - kept.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} row(s) with an empty {}", mapping.symbol_column);
    }

    let trades = kept
        .iter()
        .enumerate()
        .map(|(index, row)| normalize_row(row, index + 1, mapping, policy))
        .collect::<Result<Vec<_>, _>>()?;

    if trades.is_empty() {
        return Err(ParseError::NoValidTrades);
    }

    log::debug!("normalized {} trade(s) from {} row(s)", trades.len(), rows.len());
    Ok(trades)
}

/// Only the first row is used as the schema; later rows are not re-checked.
fn check_schema(first: &RawRow, mapping: &ColumnMapping) -> Result<(), ParseError> {
    match mapping
        .required_columns()
        .into_iter()
        .find(|col| !first.has_column(col))
    {
        Some(missing) => {
            let found: Vec<&str> = first.columns().collect();
            log::warn!("column '{missing}' not found; first row has {found:?}");
            Err(ParseError::MissingColumn(missing.to_string()))
        }
        None => Ok(()),
    }
}

fn has_symbol(row: &RawRow, symbol_column: &str) -> bool {
    row.get(symbol_column).is_some_and(|cell| !cell.is_blank())
}

fn normalize_row(
    row: &RawRow,
    id: usize,
    mapping: &ColumnMapping,
    policy: ValuePolicy,
) -> Result<Trade, ParseError> {
    let symbol = cell_text(row, &mapping.symbol_column).trim().to_string();

    let date = cell_text(row, &mapping.date_column);
    let timestamp = match &mapping.time_column {
        Some(time_column) => parse_split(&date, &cell_text(row, time_column)),
        None => parse_combined(&date),
    }
    .map_err(|e| e.at_row(id))?;

    let mut value = row.get(&mapping.value_column).map_or(f64::NAN, RawCell::as_number);
    if !value.is_finite() {
        match policy {
            ValuePolicy::Strict => return Err(ParseError::InvalidValue { row: id }),
            ValuePolicy::Lenient => {
                log::warn!("row {id}: non-numeric {} kept as NaN", mapping.value_column);
                value = f64::NAN;
            }
        }
    }

    Ok(Trade::new(id, symbol, timestamp, value))
}

fn cell_text(row: &RawRow, column: &str) -> String {
    row.get(column).map(RawCell::as_text).unwrap_or_default()
}
