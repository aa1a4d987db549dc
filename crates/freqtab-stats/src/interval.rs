//! Class label parsing.
//!
//! A class label is free text naming a numeric range. The accepted range
//! separators are tried in a fixed order:
//!
//! 1. hyphen: `"8-10"`
//! 2. the word `a`: `"8 a 10"`
//! 3. the word `até` (or `ate`): `"8 até 10"`
//!
//! Decimal commas are normalized to points first, so `"8,5-10,5"` yields
//! `(8.5, 10.5)`. When no separator matches, the first two numeric tokens of
//! the label are used in order of appearance. Signs are never parsed.
//!
//! # Examples
//!
//! ```
//! use freqtab_stats::interval::parse_class_limits;
//!
//! assert_eq!(parse_class_limits("8-10").unwrap(), (8.0, 10.0));
//! assert_eq!(parse_class_limits("8 a 10").unwrap(), (8.0, 10.0));
//! assert_eq!(parse_class_limits("2,5 até 7,5").unwrap(), (2.5, 7.5));
//! assert!(parse_class_limits("ten to twelve").is_err());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::FreqTableError;

const NUMBER: &str = r"\d+(?:\.\d*)?";

static RANGE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    let range = |separator: &str| {
        Regex::new(&format!(r"({NUMBER})\s*{separator}\s*({NUMBER})"))
            .expect("range pattern is valid")
    };
    [range("-"), range("a"), range("at[eé]")]
});

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBER).expect("number pattern is valid"));

/// Extracts the `(lower, upper)` bounds of a class label.
///
/// The bounds are returned in the order they appear in the label; checking
/// that `lower < upper` is left to [`ClassRow`](crate::ClassRow).
///
/// # Errors
///
/// Returns [`FreqTableError::Parse`] if fewer than two numeric tokens can be
/// found in the label.
pub fn parse_class_limits(label: &str) -> Result<(f64, f64), FreqTableError> {
    let normalized = label.trim().replace(',', ".");
    let parse_error = || FreqTableError::Parse {
        label: label.to_owned(),
    };

    for pattern in RANGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&normalized) {
            let lower = parse_number(&caps[1]).ok_or_else(parse_error)?;
            let upper = parse_number(&caps[2]).ok_or_else(parse_error)?;
            return Ok((lower, upper));
        }
    }

    // Fallback for unexpected separators; must stay last so it cannot hide
    // a label that one of the range patterns would have rejected.
    let mut numbers = NUMBER_TOKEN
        .find_iter(&normalized)
        .filter_map(|m| parse_number(m.as_str()));
    match (numbers.next(), numbers.next()) {
        (Some(lower), Some(upper)) => {
            log::trace!("class '{label}' parsed by numeric fallback");
            Ok((lower, upper))
        }
        _ => Err(parse_error()),
    }
}

/// Parses a numeric cell, accepting either a comma or a point as the decimal
/// separator.
///
/// Returns `None` for text that is not a number.
///
/// # Examples
///
/// ```
/// use freqtab_stats::interval::parse_decimal;
///
/// assert_eq!(parse_decimal("13"), Some(13.0));
/// assert_eq!(parse_decimal(" 2,5 "), Some(2.5));
/// assert_eq!(parse_decimal("n/a"), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    parse_number(&text.trim().replace(',', "."))
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
