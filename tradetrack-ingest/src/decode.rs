//! Tabular decoding: spreadsheet bytes → header-keyed raw rows.
//!
//! Only the first worksheet is read and its first row is the header. The
//! output follows "sheet to JSON" conventions so the normalizer sees the same
//! shape regardless of the file format:
//! - empty cells are left out of the row mapping
//! - rows with no cells at all are skipped
//! - columns with an empty header are ignored
//! - a repeated header gets a `_1`, `_2`, ... suffix

use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tradetrack_core::{RawCell, RawRow};

use crate::error::IngestError;

/// Input formats accepted by the importer, keyed off the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.xlsx`, `.xls` or `.ods`
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx" | "xls" | "ods") => Ok(SourceFormat::Workbook),
            Some("csv") => Ok(SourceFormat::Csv),
            _ => Err(IngestError::UnsupportedExtension(
                path.display().to_string(),
            )),
        }
    }
}

/// Read a file and decode it according to its extension.
///
/// The extension is checked before the file is opened. The detected format
/// is returned alongside the rows.
pub fn decode_file(path: &Path) -> Result<(SourceFormat, Vec<RawRow>), IngestError> {
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((format, decode_bytes(&bytes, format)?))
}

pub fn decode_bytes(bytes: &[u8], format: SourceFormat) -> Result<Vec<RawRow>, IngestError> {
    let rows = match format {
        SourceFormat::Workbook => decode_workbook(bytes)?,
        SourceFormat::Csv => decode_csv(bytes)?,
    };
    log::debug!("decoded {} row(s) as {format:?}", rows.len());
    Ok(rows)
}

/// Decode the first worksheet of an Excel or OpenDocument workbook.
pub fn decode_workbook(bytes: &[u8]) -> Result<Vec<RawRow>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers = unique_headers(header.iter().map(|c| c.to_string().trim().to_string()));

    Ok(rows
        .filter_map(|cells| {
            build_row(
                headers
                    .iter()
                    .zip(cells)
                    .map(|(h, cell)| (h.as_str(), workbook_cell(cell))),
            )
        })
        .collect())
}

/// Decode a CSV export of the sheet. All cells arrive as text; the
/// normalizer coerces values.
pub fn decode_csv<R: Read>(reader: R) -> Result<Vec<RawRow>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = unique_headers(rdr.headers()?.iter().map(str::to_string));

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cells = headers.iter().zip(record.iter()).map(|(h, field)| {
            let cell = (!field.is_empty()).then(|| RawCell::Text(field.to_string()));
            (h.as_str(), cell)
        });
        if let Some(row) = build_row(cells) {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn workbook_cell(cell: &Data) -> Option<RawCell> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(RawCell::Text(s.clone())),
        Data::Float(f) => Some(RawCell::Number(*f)),
        Data::Int(i) => Some(RawCell::Number(*i as f64)),
        other => Some(RawCell::Text(other.to_string())),
    }
}

/// Rename repeated headers so no column overwrites another in the row map.
/// Empty headers are left alone; their columns are dropped later.
fn unique_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let headers: Vec<String> = headers.collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        if header.is_empty() || seen.insert(header.clone()) {
            out.push(header);
            continue;
        }
        let renamed = (1..)
            .map(|n| format!("{header}_{n}"))
            .find(|candidate| !seen.contains(candidate))
            .unwrap_or_default();
        log::warn!("duplicate column header '{header}' renamed to '{renamed}'");
        seen.insert(renamed.clone());
        out.push(renamed);
    }
    out
}

/// `None` when every cell is missing, so blank lines vanish.
fn build_row<'a>(cells: impl Iterator<Item = (&'a str, Option<RawCell>)>) -> Option<RawRow> {
    let row: RawRow = cells
        .filter(|(header, _)| !header.is_empty())
        .filter_map(|(header, cell)| cell.map(|c| (header, c)))
        .collect();
    (!row.is_empty()).then_some(row)
}
