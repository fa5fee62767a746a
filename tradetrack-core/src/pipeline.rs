//! Pipeline entry point: normalize → sequence → project.
//!
//! A [`Pipeline`] holds only configuration. Every call to [`Pipeline::parse`]
//! is independent; nothing is retained between calls.

use serde::{Deserialize, Serialize};

use crate::chart::project_chart;
use crate::columns::ColumnMapping;
use crate::domain::{ParsedDataset, RawRow};
use crate::error::ParseError;
use crate::normalize::{normalize_rows, ValuePolicy};
use crate::sequence::sequence_and_accumulate;

/// Parse with the combined `SYMBOL` / `DateTime` / `value` schema and a
/// strict value policy.
pub fn parse(rows: &[RawRow], initial_investment: f64) -> Result<ParsedDataset, ParseError> {
    Pipeline::default().parse(rows, initial_investment)
}

/// Configured parse-normalize-aggregate pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub value_policy: ValuePolicy,
}

impl Pipeline {
    pub fn new(columns: ColumnMapping, value_policy: ValuePolicy) -> Self {
        Self {
            columns,
            value_policy,
        }
    }

    pub fn parse(
        &self,
        rows: &[RawRow],
        initial_investment: f64,
    ) -> Result<ParsedDataset, ParseError> {
        if !initial_investment.is_finite() {
            return Err(ParseError::InvalidInitialInvestment(initial_investment));
        }

        let trades = normalize_rows(rows, &self.columns, self.value_policy)?;
        let trades = sequence_and_accumulate(trades, initial_investment);
        let chart_data = project_chart(&trades, initial_investment);

        log::debug!(
            "parsed {} trade(s), final value {:.2}",
            trades.len(),
            trades.last().map_or(initial_investment, |t| t.accumulated_value)
        );

        Ok(ParsedDataset {
            trades,
            chart_data,
            initial_investment,
        })
    }
}
