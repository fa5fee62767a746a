//! Chronological sequencing and accumulation.

use crate::domain::Trade;

/// Sort trades by timestamp and write each trade's running total.
///
/// The sort is stable: trades sharing a timestamp keep their input order.
/// The accumulation is a single sequential pass seeded with
/// `initial_investment`.
pub fn sequence_and_accumulate(mut trades: Vec<Trade>, initial_investment: f64) -> Vec<Trade> {
    trades.sort_by_key(|t| t.timestamp);

    let mut running = initial_investment;
    for trade in &mut trades {
        running += trade.value;
        trade.accumulated_value = running;
    }

    trades
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn sorts_chronologically_and_accumulates() {
        let trades = vec![
            Trade::new(1, "AAPL", ts(2, 15), 100.0),
            Trade::new(2, "MSFT", ts(1, 9), -50.0),
        ];
        let out = sequence_and_accumulate(trades, 1000.0);

        assert_eq!(out[0].id, 2);
        assert_eq!(out[0].accumulated_value, 950.0);
        assert_eq!(out[1].id, 1);
        assert_eq!(out[1].accumulated_value, 1050.0);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let trades = vec![
            Trade::new(1, "C", ts(3, 9), 1.0),
            Trade::new(2, "A", ts(1, 9), 1.0),
            Trade::new(3, "B", ts(1, 9), 1.0),
            Trade::new(4, "D", ts(1, 9), 1.0),
        ];
        let ids: Vec<_> = sequence_and_accumulate(trades, 0.0)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[test]
    fn nan_poisons_everything_after_it() {
        let trades = vec![
            Trade::new(1, "A", ts(1, 9), 10.0),
            Trade::new(2, "B", ts(2, 9), f64::NAN),
            Trade::new(3, "C", ts(3, 9), 10.0),
        ];
        let out = sequence_and_accumulate(trades, 100.0);
        assert_eq!(out[0].accumulated_value, 110.0);
        assert!(out[1].accumulated_value.is_nan());
        assert!(out[2].accumulated_value.is_nan());
    }

    #[test]
    fn empty_ledger_stays_empty() {
        assert!(sequence_and_accumulate(Vec::new(), 500.0).is_empty());
    }
}
