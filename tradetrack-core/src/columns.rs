//! Column mapping — which header names hold the symbol, timestamp and value.
//!
//! Two schema variants exist in the wild: a single combined `DateTime`
//! column, and separate `M/D/YY` and `H:MM AM/PM` columns. Both are
//! expressed as a [`ColumnMapping`], resolved once before validation starts.

use serde::{Deserialize, Serialize};

/// Header names the normalizer reads from each row.
///
/// Fields left out of a config file fall back to the combined schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub symbol_column: String,
    /// Holds the full `M/D/YY H:MM AM/PM` string, or only the date part when
    /// `time_column` is set.
    pub date_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_column: Option<String>,
    pub value_column: String,
}

impl ColumnMapping {
    /// `SYMBOL`, `DateTime`, `value`.
    pub fn combined() -> Self {
        Self {
            symbol_column: "SYMBOL".into(),
            date_column: "DateTime".into(),
            time_column: None,
            value_column: "value".into(),
        }
    }

    /// `SYMBOL`, `M/D/YY`, `H:MM AM/PM`, `value`.
    pub fn split() -> Self {
        Self {
            symbol_column: "SYMBOL".into(),
            date_column: "M/D/YY".into(),
            time_column: Some("H:MM AM/PM".into()),
            value_column: "value".into(),
        }
    }

    /// Required headers in check order: symbol, date, time (if mapped), value.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut cols = vec![self.symbol_column.as_str(), self.date_column.as_str()];
        if let Some(time) = &self.time_column {
            cols.push(time.as_str());
        }
        cols.push(self.value_column.as_str());
        cols
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::combined()
    }
}
