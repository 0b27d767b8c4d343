//! Timeout validation for configured network and browser operations

use std::time::Duration;

use super::ApyError;

/// Maximum accepted timeout for any configured operation (5 minutes)
/// Covers slow-loading bank sites and heavy SPAs
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validate a configured timeout and convert it to a `Duration`
///
/// # Arguments
/// * `field` - Config key, used in the error message
/// * `ms` - Timeout in milliseconds
///
/// # Returns
/// * `Ok(Duration)` - Validated Duration object
/// * `Err(ApyError::InvalidConfig)` - If the timeout is zero or exceeds `MAX_TIMEOUT_MS`
pub fn validate_timeout(field: &str, ms: u64) -> Result<Duration, ApyError> {
    if ms == 0 {
        return Err(ApyError::InvalidConfig(format!(
            "{field} must be greater than 0ms"
        )));
    }

    if ms > MAX_TIMEOUT_MS {
        return Err(ApyError::InvalidConfig(format!(
            "{} cannot exceed {}ms ({} minutes). Received: {}ms ({:.1} minutes)",
            field,
            MAX_TIMEOUT_MS,
            MAX_TIMEOUT_MS / 60_000,
            ms,
            ms as f64 / 60_000.0
        )));
    }

    Ok(Duration::from_millis(ms))
}

/// Same as [`validate_timeout`], but an unset timeout stays unset
pub fn validate_optional_timeout(
    field: &str,
    ms: Option<u64>,
) -> Result<Option<Duration>, ApyError> {
    ms.map(|ms| validate_timeout(field, ms)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_timeouts_within_range() {
        let timeout = validate_timeout("http.timeout_ms", 45_000).unwrap();
        assert_eq!(timeout, Duration::from_millis(45_000));
        assert!(validate_timeout("http.timeout_ms", MAX_TIMEOUT_MS).is_ok());
    }

    #[test]
    fn rejects_zero_and_oversized_timeouts() {
        let err = validate_timeout("http.timeout_ms", 0).unwrap_err();
        assert!(err.to_string().contains("http.timeout_ms"));

        let err = validate_timeout("browser.request_timeout_ms", MAX_TIMEOUT_MS + 1).unwrap_err();
        assert!(matches!(err, ApyError::InvalidConfig(_)));
    }

    #[test]
    fn unset_optional_timeout_stays_unset() {
        assert_eq!(validate_optional_timeout("browser.visible_timeout_ms", None).unwrap(), None);
        assert_eq!(
            validate_optional_timeout("browser.visible_timeout_ms", Some(1_000)).unwrap(),
            Some(Duration::from_secs(1))
        );
    }
}
