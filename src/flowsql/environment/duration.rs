//! Unit-suffixed duration parsing
//!
//! Durations in the property bag are written as a positive integer followed
//! by a single unit letter: `90s`, `30m`, `1h`, `7d`. The whole string must
//! match; there is no partial parsing and no bare-number fallback.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{EnvironmentError, EnvironmentResult};

lazy_static! {
    /// Positive integer (no leading zero) followed by one unit letter.
    static ref DURATION_PATTERN: Regex =
        Regex::new(r"^([1-9][0-9]*)([dDhHmMsS])$").expect("invalid duration regex");
}

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Parse a unit-suffixed duration string into milliseconds.
///
/// # Examples
///
/// ```rust
/// use flowsql::flowsql::environment::parse_duration_ms;
///
/// assert_eq!(parse_duration_ms("30s").unwrap(), 30_000);
/// assert_eq!(parse_duration_ms("1H").unwrap(), 3_600_000);
/// assert!(parse_duration_ms("0s").is_err());
/// ```
pub fn parse_duration_ms(value: &str) -> EnvironmentResult<u64> {
    let captures =
        DURATION_PATTERN
            .captures(value)
            .ok_or_else(|| EnvironmentError::InvalidDuration {
                value: value.to_string(),
            })?;

    let number: u64 =
        captures[1]
            .parse()
            .map_err(|_| EnvironmentError::InvalidDuration {
                value: value.to_string(),
            })?;

    let multiplier = match &captures[2] {
        "d" | "D" => MILLIS_PER_DAY,
        "h" | "H" => MILLIS_PER_HOUR,
        "m" | "M" => MILLIS_PER_MINUTE,
        "s" | "S" => MILLIS_PER_SECOND,
        _ => unreachable!("duration pattern admits only d/h/m/s units"),
    };

    // The pattern puts no ceiling on the digit count; an overflowing value
    // is a configuration error, not a panic.
    number
        .checked_mul(multiplier)
        .ok_or_else(|| EnvironmentError::InvalidDuration {
            value: value.to_string(),
        })
}

/// True when the string matches the duration pattern without parsing it.
pub fn is_duration(value: &str) -> bool {
    DURATION_PATTERN.is_match(value)
}
