//! Rate sanitization: pull the first decimal number out of scraped text

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::RateParseError;

/// One or more ASCII digits, optionally followed by a dot and one or more digits
///
/// `\d` would also match other Unicode decimal digits, which `f64` parsing rejects.
static RATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("rate pattern is a valid regex"));

/// Extract the first decimal number in `text` as a rate
///
/// Only `.` is treated as a decimal separator. Signs, percent signs,
/// thousands separators and exponents are not part of the match, so
/// `"-0.5%"` yields `0.5` and `"1,250.00"` yields `1.0`.
pub fn extract_rate(text: &str) -> Result<f64, RateParseError> {
    let matched = RATE_RE
        .find(text)
        .ok_or(RateParseError::NoNumberFound)?
        .as_str();

    matched
        .parse::<f64>()
        .map_err(|source| RateParseError::InvalidNumber {
            text: matched.to_string(),
            source,
        })
}
