//! Chart projection: the anchor point followed by one point per trade.

use chrono::Local;

use crate::domain::{ChartPoint, Trade, TradePoint};

/// Project an accumulated, chronological ledger into chart points.
///
/// The anchor takes the first trade's timestamp. An empty ledger never comes
/// out of the pipeline; if one is projected anyway the anchor is stamped with
/// the current local time.
pub fn project_chart(trades: &[Trade], initial_investment: f64) -> Vec<ChartPoint> {
    let anchor_time = trades
        .first()
        .map_or_else(|| Local::now().naive_local(), |t| t.timestamp);

    let mut points = Vec::with_capacity(trades.len() + 1);
    points.push(ChartPoint::anchor(anchor_time, initial_investment));
    points.extend(trades.iter().map(|t| ChartPoint::Trade(TradePoint::from(t))));
    points
}
