//! `yyyyMMdd` query dates and the range bounds built from them.

use jiff::civil::{Date, DateTime};

use crate::error::{AppError, AppResult};

/// Lower bound used when no start date is given.
pub const MIN_DATE: Date = Date::constant(1, 1, 1);
/// Upper bound used when no end date is given.
pub const MAX_DATE: Date = Date::constant(9999, 12, 31);

/// Parses a compact `yyyyMMdd` date. Empty or absent input yields `None`.
pub fn parse_compact_date(value: Option<&str>) -> AppResult<Option<Date>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_date(raw));
    }

    let year: i16 = raw[0..4].parse().map_err(|_| invalid_date(raw))?;
    let month: i8 = raw[4..6].parse().map_err(|_| invalid_date(raw))?;
    let day: i8 = raw[6..8].parse().map_err(|_| invalid_date(raw))?;

    Date::new(year, month, day)
        .map(Some)
        .map_err(|_| invalid_date(raw))
}

/// Inclusive `[start 00:00:00, end 23:59:59.999999]` range; absent bounds are unbounded.
pub fn date_range(start: Option<&str>, end: Option<&str>) -> AppResult<(DateTime, DateTime)> {
    let start = parse_compact_date(start)?.unwrap_or(MIN_DATE);
    let end = parse_compact_date(end)?.unwrap_or(MAX_DATE);

    Ok((start_of_day(start), end_of_day(end)))
}

pub fn start_of_day(date: Date) -> DateTime {
    date.at(0, 0, 0, 0)
}

/// PostgreSQL `timestamp` keeps microseconds, so the last representable instant is `.999999`.
pub fn end_of_day(date: Date) -> DateTime {
    date.at(23, 59, 59, 999_999_000)
}

fn invalid_date(raw: &str) -> AppError {
    AppError::bad_request(format!("Invalid date '{}', expected yyyyMMdd", raw))
}
