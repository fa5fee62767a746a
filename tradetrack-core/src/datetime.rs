//! Trade timestamp grammar.
//!
//! A timestamp is a date token and a time part separated by whitespace:
//!
//! ```text
//! M/D/YY H:MM [AM|PM]
//! ```
//!
//! - month and day are 1–2 digits, the year is exactly 2 digits and lands in
//!   2000–2099
//! - the period marker is case-insensitive; without one the hour is taken as
//!   24-hour already
//! - `12 AM` is midnight, `12 PM` is noon
//!
//! The hour is checked before anything else in the time part so that a
//! non-numeric hour is reported as such, even when the date is also broken.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ParseError;

/// Why a timestamp cell was rejected. The normalizer attaches the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampError {
    Format,
    Hour,
}

impl TimestampError {
    pub fn at_row(self, row: usize) -> ParseError {
        match self {
            TimestampError::Format => ParseError::InvalidDateFormat { row },
            TimestampError::Hour => ParseError::InvalidHour { row },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Am,
    Pm,
}

/// Parse a combined `M/D/YY H:MM AM/PM` cell.
pub fn parse_combined(cell: &str) -> Result<NaiveDateTime, TimestampError> {
    let (date_part, time_part) = cell
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(TimestampError::Format)?;
    parse_parts(date_part, time_part)
}

/// Parse a separate date cell (`M/D/YY`) and time cell (`H:MM AM/PM`).
pub fn parse_split(date_cell: &str, time_cell: &str) -> Result<NaiveDateTime, TimestampError> {
    parse_parts(date_cell, time_cell)
}

fn parse_parts(date_part: &str, time_part: &str) -> Result<NaiveDateTime, TimestampError> {
    let date_part = date_part.trim();
    let time_part = time_part.trim();
    if date_part.is_empty() || time_part.is_empty() {
        return Err(TimestampError::Format);
    }

    let time = parse_time(time_part)?;
    let date = parse_date(date_part)?;
    Ok(date.and_time(time))
}

fn parse_date(token: &str) -> Result<NaiveDate, TimestampError> {
    let mut parts = token.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimestampError::Format);
    };

    let month = digits(month, 1, 2).ok_or(TimestampError::Format)?;
    let day = digits(day, 1, 2).ok_or(TimestampError::Format)?;
    let short_year = digits(year, 2, 2).ok_or(TimestampError::Format)?;

    NaiveDate::from_ymd_opt(2000 + short_year as i32, month, day).ok_or(TimestampError::Format)
}

fn parse_time(part: &str) -> Result<NaiveTime, TimestampError> {
    let mut tokens = part.split_whitespace();
    let clock = tokens.next().ok_or(TimestampError::Format)?;
    let period = tokens.next().map(parse_period).transpose()?;
    if tokens.next().is_some() {
        return Err(TimestampError::Format);
    }

    let (hours, minutes) = clock.split_once(':').unwrap_or((clock, ""));
    let hour = digits(hours, 1, 2).ok_or(TimestampError::Hour)?;
    let minute = digits(minutes, 2, 2).ok_or(TimestampError::Format)?;

    let hour = match period {
        Some(Period::Pm) if hour != 12 => hour + 12,
        Some(Period::Am) if hour == 12 => 0,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TimestampError::Format)
}

fn parse_period(token: &str) -> Result<Period, TimestampError> {
    if token.eq_ignore_ascii_case("AM") {
        Ok(Period::Am)
    } else if token.eq_ignore_ascii_case("PM") {
        Ok(Period::Pm)
    } else {
        Err(TimestampError::Format)
    }
}

/// ASCII digits only, with a length in `min..=max`.
fn digits(token: &str, min: usize, max: usize) -> Option<u32> {
    if token.len() < min || token.len() > max || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
