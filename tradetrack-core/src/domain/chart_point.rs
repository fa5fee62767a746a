//! ChartPoint — presentation-oriented projection of the ledger.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// Symbol reported by the initial-investment anchor.
pub const ANCHOR_SYMBOL: &str = "INITIAL";

/// Id reported by the initial-investment anchor. Real trades start at 1.
pub const ANCHOR_ID: usize = 0;

/// One point of the chart series.
///
/// The synthetic initial-investment point is its own variant rather than a
/// trade with sentinel fields; the accessors still report the sentinel
/// values (`id() == 0`, `symbol() == "INITIAL"`) for consumers that want a
/// flat view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartPoint {
    Anchor {
        timestamp: NaiveDateTime,
        #[serde(with = "super::nullable_float")]
        amount: f64,
    },
    Trade(TradePoint),
}

/// Chart view of a single accumulated trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePoint {
    pub id: usize,
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    #[serde(with = "super::nullable_float")]
    pub value: f64,
    #[serde(with = "super::nullable_float")]
    pub accumulated_value: f64,
}

impl From<&Trade> for TradePoint {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.id,
            symbol: trade.symbol.clone(),
            timestamp: trade.timestamp,
            value: trade.value,
            accumulated_value: trade.accumulated_value,
        }
    }
}

impl ChartPoint {
    pub fn anchor(timestamp: NaiveDateTime, initial_investment: f64) -> Self {
        ChartPoint::Anchor {
            timestamp,
            amount: initial_investment,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            ChartPoint::Anchor { timestamp, .. } => *timestamp,
            ChartPoint::Trade(p) => p.timestamp,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            ChartPoint::Anchor { amount, .. } => *amount,
            ChartPoint::Trade(p) => p.value,
        }
    }

    pub fn accumulated_value(&self) -> f64 {
        match self {
            ChartPoint::Anchor { amount, .. } => *amount,
            ChartPoint::Trade(p) => p.accumulated_value,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            ChartPoint::Anchor { .. } => ANCHOR_SYMBOL,
            ChartPoint::Trade(p) => &p.symbol,
        }
    }

    pub fn id(&self) -> usize {
        match self {
            ChartPoint::Anchor { .. } => ANCHOR_ID,
            ChartPoint::Trade(p) => p.id,
        }
    }

    pub fn is_initial_investment(&self) -> bool {
        matches!(self, ChartPoint::Anchor { .. })
    }

    /// The trade behind this point. The anchor is not a trade and is not
    /// selectable.
    pub fn as_trade_point(&self) -> Option<&TradePoint> {
        match self {
            ChartPoint::Anchor { .. } => None,
            ChartPoint::Trade(p) => Some(p),
        }
    }
}
