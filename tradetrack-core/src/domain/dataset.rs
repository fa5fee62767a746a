//! ParsedDataset — the pipeline's final output.

use serde::{Deserialize, Serialize};

use super::chart_point::ChartPoint;
use super::trade::Trade;

/// Chronological ledger plus its chart series.
///
/// `chart_data` always holds the anchor first, followed by one point per
/// trade in the same order as `trades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDataset {
    pub trades: Vec<Trade>,
    pub chart_data: Vec<ChartPoint>,
    #[serde(with = "super::nullable_float")]
    pub initial_investment: f64,
}

impl ParsedDataset {
    /// Look up a trade by its input-order id.
    pub fn find_trade(&self, id: usize) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// Portfolio value after the last chronological trade, or the initial
    /// investment for an empty ledger.
    pub fn final_value(&self) -> f64 {
        self.trades
            .last()
            .map_or(self.initial_investment, |t| t.accumulated_value)
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
