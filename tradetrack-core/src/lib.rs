//! TradeTrack Core — parse, normalize and accumulate a spreadsheet trade ledger.
//!
//! This crate is the pure part of the system; it performs no I/O:
//! - Domain types (raw rows, trades, chart points, parsed dataset)
//! - Column mapping for the combined and split timestamp schemas
//! - The `M/D/YY H:MM AM/PM` timestamp grammar
//! - Row validation and normalization
//! - Stable chronological sequencing with a running total
//! - Chart projection with the initial-investment anchor
//! - Ledger views (sorting, summary)

pub mod chart;
pub mod columns;
pub mod datetime;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod normalize;
pub mod pipeline;
pub mod sequence;

pub use columns::ColumnMapping;
pub use domain::{ChartPoint, ParsedDataset, RawCell, RawRow, Trade, TradePoint};
pub use error::ParseError;
pub use ledger::{sort_trades, LedgerSummary, SortDirection, SortField};
pub use normalize::ValuePolicy;
pub use pipeline::{parse, Pipeline};
