//! Domain types for TradeTrack

pub mod chart_point;
pub mod dataset;
mod nullable_float;
pub mod raw_row;
pub mod trade;

pub use chart_point::{ChartPoint, TradePoint, ANCHOR_ID, ANCHOR_SYMBOL};
pub use dataset::ParsedDataset;
pub use raw_row::{RawCell, RawRow};
pub use trade::Trade;
