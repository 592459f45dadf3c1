//! Idle-state TTL resolution
//!
//! Keyed state that has not been touched for the configured minimum retention
//! becomes eligible for expiry; the maximum bounds how long the host runtime
//! may keep it beyond that. Both bounds must be configured together — the
//! resolver never infers a missing side.

use serde::{Deserialize, Serialize};

use super::duration::{is_duration, parse_duration_ms};
use super::error::{EnvironmentError, EnvironmentResult};

/// Minimum/maximum idle-state retention, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

/// Resolve the idle-state TTL pair from its two raw property values.
///
/// Returns `Ok(None)` when neither bound is configured, an
/// [`EnvironmentError::InvalidTtlConfiguration`] when only one bound is
/// present or either fails the duration pattern, and `Ok(Some(range))`
/// when both bounds resolve to strictly positive millisecond values.
///
/// A pair whose resolved values are not both positive is silently dropped
/// rather than rejected. The duration pattern already excludes zero
/// magnitudes, so this branch is unreachable today, but the drop-not-error
/// behavior is part of the contract and is kept as is.
pub fn resolve_ttl(min: Option<&str>, max: Option<&str>) -> EnvironmentResult<Option<TtlRange>> {
    let min = min.map(str::trim).filter(|s| !s.is_empty());
    let max = max.map(str::trim).filter(|s| !s.is_empty());

    let (min_raw, max_raw) = match (min, max) {
        (None, None) => return Ok(None),
        (Some(min_raw), Some(max_raw)) => (min_raw, max_raw),
        _ => return Err(both_bounds_required()),
    };

    if !is_duration(min_raw) || !is_duration(max_raw) {
        return Err(both_bounds_required());
    }

    let min_ms = parse_duration_ms(min_raw)?;
    let max_ms = parse_duration_ms(max_raw)?;

    if min_ms > 0 && max_ms > 0 {
        Ok(Some(TtlRange { min_ms, max_ms }))
    } else {
        Ok(None)
    }
}

fn both_bounds_required() -> EnvironmentError {
    EnvironmentError::InvalidTtlConfiguration {
        message: "sql.ttl.min and sql.ttl.max must be set together as durations, \
                  e.g. sql.ttl.min=1h, sql.ttl.max=2h"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_bounds_present() {
        let range = resolve_ttl(Some("1h"), Some("2h")).unwrap().unwrap();
        assert_eq!(range.min_ms, 3_600_000);
        assert_eq!(range.max_ms, 7_200_000);
    }

    #[test]
    fn test_neither_bound_present() {
        assert_eq!(resolve_ttl(None, None).unwrap(), None);
        assert_eq!(resolve_ttl(Some(""), Some("  ")).unwrap(), None);
    }

    #[test]
    fn test_single_bound_fails() {
        assert!(matches!(
            resolve_ttl(Some("1h"), None),
            Err(EnvironmentError::InvalidTtlConfiguration { .. })
        ));
        assert!(matches!(
            resolve_ttl(None, Some("2h")),
            Err(EnvironmentError::InvalidTtlConfiguration { .. })
        ));
    }

    #[test]
    fn test_malformed_bound_fails() {
        assert!(resolve_ttl(Some("1h"), Some("soon")).is_err());
        assert!(resolve_ttl(Some("0h"), Some("2h")).is_err());
    }

    #[test]
    fn test_bounds_are_trimmed() {
        let range = resolve_ttl(Some(" 30m "), Some(" 1d ")).unwrap().unwrap();
        assert_eq!(range.min_ms, 1_800_000);
        assert_eq!(range.max_ms, 86_400_000);
    }
}
