//! Ledger views: sortable trade table and headline summary.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::{ParsedDataset, Trade};

/// Column a ledger table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    Symbol,
    Timestamp,
    Value,
    AccumulatedValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "symbol" => Ok(SortField::Symbol),
            "timestamp" | "date" => Ok(SortField::Timestamp),
            "value" => Ok(SortField::Value),
            "accumulated" | "accumulated_value" => Ok(SortField::AccumulatedValue),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Id => "id",
            SortField::Symbol => "symbol",
            SortField::Timestamp => "timestamp",
            SortField::Value => "value",
            SortField::AccumulatedValue => "accumulated",
        };
        f.write_str(name)
    }
}

/// Trades ordered by `field`. Stable, so ties keep chronological order.
pub fn sort_trades(trades: &[Trade], field: SortField, direction: SortDirection) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

fn compare(a: &Trade, b: &Trade, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Symbol => a.symbol.cmp(&b.symbol),
        SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortField::Value => a.value.total_cmp(&b.value),
        SortField::AccumulatedValue => a.accumulated_value.total_cmp(&b.accumulated_value),
    }
}

/// Headline numbers for a parsed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_trades: usize,
    pub initial_investment: f64,
    /// Accumulated value after the last trade.
    pub final_value: f64,
    pub net_profit: f64,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Net profit as a fraction of the initial investment; `None` when
    /// nothing was invested.
    pub return_on_investment: Option<f64>,
}

impl LedgerSummary {
    pub fn from_dataset(dataset: &ParsedDataset) -> Self {
        let final_value = dataset.final_value();
        let net_profit = final_value - dataset.initial_investment;
        let return_on_investment =
            (dataset.initial_investment != 0.0).then(|| net_profit / dataset.initial_investment);

        Self {
            total_trades: dataset.trades.len(),
            initial_investment: dataset.initial_investment,
            final_value,
            net_profit,
            winning_trades: dataset.trades.iter().filter(|t| t.is_winner()).count(),
            losing_trades: dataset.trades.iter().filter(|t| t.is_loser()).count(),
            return_on_investment,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRow;
    use crate::pipeline::parse;

    fn dataset() -> ParsedDataset {
        let rows = vec![
            RawRow::new()
                .with("SYMBOL", "MSFT")
                .with("DateTime", "1/3/24 10:00 AM")
                .with("value", 25.0),
            RawRow::new()
                .with("SYMBOL", "AAPL")
                .with("DateTime", "1/2/24 3:00 PM")
                .with("value", 100.0),
            RawRow::new()
                .with("SYMBOL", "TSLA")
                .with("DateTime", "1/1/24 9:00 AM")
                .with("value", -50.0),
        ];
        parse(&rows, 1000.0).unwrap()
    }

    fn ids(trades: &[&Trade]) -> Vec<usize> {
        trades.iter().map(|t| t.id).collect()
    }

    #[test]
    fn sort_by_each_field() {
        let ds = dataset();
        let asc = SortDirection::Asc;
        assert_eq!(ids(&sort_trades(&ds.trades, SortField::Id, asc)), vec![1, 2, 3]);
        assert_eq!(ids(&sort_trades(&ds.trades, SortField::Symbol, asc)), vec![2, 1, 3]);
        assert_eq!(ids(&sort_trades(&ds.trades, SortField::Timestamp, asc)), vec![3, 2, 1]);
        assert_eq!(ids(&sort_trades(&ds.trades, SortField::Value, asc)), vec![3, 1, 2]);
        assert_eq!(
            ids(&sort_trades(&ds.trades, SortField::AccumulatedValue, asc)),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn descending_reverses() {
        let ds = dataset();
        let sorted = sort_trades(&ds.trades, SortField::Id, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn sort_field_parses_cli_names() {
        assert_eq!("accumulated".parse::<SortField>(), Ok(SortField::AccumulatedValue));
        assert_eq!("DATE".parse::<SortField>(), Ok(SortField::Timestamp));
        assert!("volume".parse::<SortField>().is_err());
        assert_eq!(SortField::AccumulatedValue.to_string(), "accumulated");
    }

    #[test]
    fn summary_numbers() {
        let summary = LedgerSummary::from_dataset(&dataset());
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.final_value, 1075.0);
        assert_eq!(summary.net_profit, 75.0);
        assert_eq!(summary.winning_trades, 2);
        assert_eq!(summary.losing_trades, 1);
        assert_eq!(summary.return_on_investment, Some(0.075));
        assert!(summary.is_profitable());
    }

    #[test]
    fn zero_investment_has_no_return_ratio() {
        let rows = vec![RawRow::new()
            .with("SYMBOL", "AAPL")
            .with("DateTime", "1/2/24 3:00 PM")
            .with("value", 10.0)];
        let summary = LedgerSummary::from_dataset(&parse(&rows, 0.0).unwrap());
        assert_eq!(summary.return_on_investment, None);
        assert_eq!(summary.final_value, 10.0);
    }
}
