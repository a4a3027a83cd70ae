/// Common utility functions.
use crate::field::FieldValueType;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// Splits `input` on every occurrence of `separator`.
///
/// Empty parts are kept. If `limit` is set, splitting stops after `limit` parts
/// and the rest of the input is dropped.
pub(crate) fn split<'a>(input: &'a str, separator: &str, limit: Option<usize>) -> Vec<&'a str> {
    input.split(separator).take(limit.unwrap_or(usize::MAX)).collect()
}

/// Converts string of decimal digits into unsigned number.
pub(crate) fn parse_digital_value(input: &str) -> Option<FieldValueType> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        input.parse::<FieldValueType>().ok()
    }
}

/// Converts string with mnemonic value representation into its index in `values`.
pub(crate) fn parse_string_value(input: &str, values: &[&str]) -> Option<FieldValueType> {
    if input.is_empty() {
        None
    } else {
        values
            .iter()
            .position(|x| x.eq_ignore_ascii_case(input))
            .and_then(|i| FieldValueType::try_from(i).ok())
    }
}

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Moves date/time by `step` months keeping day of month and time,
/// a day beyond the end of the target month overflows into the following month.
pub(crate) fn shift_months(current: NaiveDateTime, step: i64) -> Option<NaiveDateTime> {
    let months = i64::from(current.year()) * 12 + i64::from(current.month0()) + step;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;

    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(current.day0())))
        .map(|date| date.and_time(current.time()))
}
