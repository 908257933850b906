//! Dollar amount formatting and lenient parsing.
//!
//! Display form is `$` + comma-grouped integer part + two decimals
//! (`"$1,234.50"`). Raw form is the bare number. Parsing never fails:
//! anything that does not read as a number collapses to zero.

use crate::domain::model::RawValue;
use regex::Regex;
use std::sync::LazyLock;

pub const CURRENCY_SYMBOL: &str = "$";
pub const PRECISION: usize = 2;
pub const THOUSANDS_SEPARATOR: char = ',';

/// `(1,234.00)` is accounting notation for a negative amount.
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d.*)\)").expect("parenthesized amount pattern"));

/// Lenient numeric parse of a currency string.
///
/// Keeps digits, one decimal point and a leading minus; everything else is
/// dropped. Reading stops at a second decimal point. No digits, or a digit
/// run too long for an `f64`, yields `0.0`.
pub fn unformat(value: &str) -> f64 {
    let normalized = PARENTHESIZED.replace(value, "-$1");

    let mut number = String::with_capacity(normalized.len());
    let mut negative = false;
    let mut seen_digit = false;
    let mut seen_point = false;

    for ch in normalized.chars() {
        match ch {
            '0'..='9' => {
                seen_digit = true;
                number.push(ch);
            }
            '-' if !seen_digit && !seen_point => negative = true,
            '.' if !seen_point => {
                seen_point = true;
                number.push('.');
            }
            '.' => break,
            _ => {}
        }
    }

    if !seen_digit {
        return 0.0;
    }

    let parsed = number
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(0.0);
    if negative {
        -parsed
    } else {
        parsed
    }
}

/// Display form to raw form. Empty input stays empty.
pub fn to_raw(display: &str) -> RawValue {
    if display.is_empty() {
        return RawValue::Empty;
    }
    RawValue::Number(unformat(display))
}

/// Raw form (number, [`RawValue`] or numeric-like string) to display form.
/// Empty renders as `"$0.00"`.
pub fn to_display<V: Into<RawValue>>(raw: V) -> String {
    format_money(raw.into().as_number())
}

/// Rounds half away from zero to `precision` places and renders with exactly that many decimals.
pub fn to_fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, round_to(value, precision))
}

pub fn round_to(value: f64, precision: usize) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let power = 10f64.powi(precision as i32);
    let scaled = value * power;
    if !scaled.is_finite() {
        // already past the precision f64 can hold
        return value;
    }
    scaled.round() / power
}

pub fn format_money(value: f64) -> String {
    let rounded = round_to(value, PRECISION);
    let fixed = format!("{:.*}", PRECISION, rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut formatted = String::with_capacity(fixed.len() + 4);
    if rounded < 0.0 {
        formatted.push('-');
    }
    formatted.push_str(CURRENCY_SYMBOL);
    formatted.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}
