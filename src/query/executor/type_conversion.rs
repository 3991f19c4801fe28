// Type Conversion Utilities for the Execution Engine
//
// Row values are raw text. Whether a value is a number is decided at the
// point of comparison by probing it here; the result is never stored.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Probe a raw value as a number.
///
/// Surrounding whitespace is ignored and `,` digit-group separators are
/// accepted in the integer part ("28,000,000"). Infinite and NaN values are
/// not numbers.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = if trimmed.contains(',') {
        Cow::Owned(strip_digit_groups(trimmed)?)
    } else {
        Cow::Borrowed(trimmed)
    };

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Remove thousands separators, rejecting misplaced ones ("1,5", "12,34,567")
fn strip_digit_groups(text: &str) -> Option<String> {
    let (sign, unsigned) = match text.strip_prefix(['-', '+']) {
        Some(rest) => (&text[..1], rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut groups = integer.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = String::with_capacity(text.len());
    digits.push_str(sign);
    digits.push_str(first);
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }

    if let Some(fraction) = fraction {
        if fraction.contains(',') {
            return None;
        }
        digits.push('.');
        digits.push_str(fraction);
    }
    Some(digits)
}

/// Order two raw values for sorting.
///
/// Two numeric values compare numerically and two non-numeric values compare
/// lexicographically. A numeric value orders before a non-numeric one, which
/// keeps this a total order over arbitrary text.
pub fn compare_raw(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        // Both finite, so partial_cmp always answers
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
