//! Trade — one normalized ledger entry with its running portfolio total.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single trade after validation and normalization.
///
/// `id` reflects the position of the row in the filtered input, not its
/// chronological rank. `accumulated_value` is a placeholder (0.0) until the
/// sequencer has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: usize,
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    /// Standalone profit/loss contribution.
    #[serde(with = "super::nullable_float")]
    pub value: f64,
    /// Portfolio value after this trade, in chronological order.
    #[serde(with = "super::nullable_float")]
    pub accumulated_value: f64,
}

impl Trade {
    /// An unaccumulated trade straight out of the normalizer.
    pub fn new(id: usize, symbol: impl Into<String>, timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            timestamp,
            value,
            accumulated_value: 0.0,
        }
    }

    pub fn is_winner(&self) -> bool {
        self.value > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.value < 0.0
    }
}
