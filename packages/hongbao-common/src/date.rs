//! Calendar-date helpers for campaign windows.
//!
//! Dates travel as canonical `YYYY-MM-DD` strings and are compared as day
//! numbers since the Unix epoch (proleptic Gregorian). "Today" is derived
//! from block time shifted by the campaign's fixed UTC offset, so the
//! contract never depends on wall-clock time beyond the block it runs in.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid calendar date: {input}")]
    Invalid { input: String },
}

/// Parse a strict `YYYY-MM-DD` string into days since 1970-01-01.
pub fn parse_date(input: &str) -> Result<i64, DateError> {
    let invalid = || DateError::Invalid {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }
    let digits = |s: &str| -> Result<i64, DateError> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse().map_err(|_| invalid())
    };

    let year = digits(&input[0..4])?;
    let month = digits(&input[5..7])? as u32;
    let day = digits(&input[8..10])? as u32;

    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return Err(invalid());
    }
    Ok(days_from_civil(year, month, day))
}

/// Render days-since-epoch back to canonical `YYYY-MM-DD`.
pub fn format_date(days: i64) -> String {
    let (year, month, day) = civil_from_days(days);
    format!("{year:04}-{month:02}-{day:02}")
}

/// The campaign-local day a timestamp falls on.
pub fn local_day(epoch_seconds: i64, utc_offset_seconds: i32) -> i64 {
    (epoch_seconds + utc_offset_seconds as i64).div_euclid(86400)
}

/// Every day of an inclusive date range, in order.
pub fn date_range(start: &str, end: &str) -> Result<Vec<String>, DateError> {
    let first = parse_date(start)?;
    let last = parse_date(end)?;
    Ok((first..=last).map(format_date).collect())
}

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

// Civil <-> day-count conversions after Howard Hinnant's algorithms,
// shifted so day 0 is 1970-01-01.

fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = year - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = i64::from((month + 9) % 12);
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (yoe + era * 400 + i64::from(month <= 2), month, day)
}
