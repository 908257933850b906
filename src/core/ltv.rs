use crate::core::currency::{self, round_to};

pub const LTV_CEILING: f64 = 100.0;
pub const LTV_PRECISION: usize = 2;

/// Loan-to-value percentage, capped at 100 and rounded to two decimals.
///
/// Zero, negative or NaN inputs yield 0 instead of a division error.
pub fn compute_ltv(loan_amount: f64, property_value: f64) -> f64 {
    if loan_amount > 0.0 && property_value > 0.0 {
        let ratio = (loan_amount / property_value) * 100.0;
        return round_to(ratio.min(LTV_CEILING), LTV_PRECISION);
    }
    0.0
}

/// Same as [`compute_ltv`] but reads both amounts from field text (display or raw form).
pub fn compute_ltv_from_fields(loan_amount: &str, property_value: &str) -> f64 {
    compute_ltv(
        currency::to_raw(loan_amount).as_number(),
        currency::to_raw(property_value).as_number(),
    )
}

/// Text written into the LTV output field: a plain number, never currency formatted.
/// A computed zero is written as `"0"`.
pub fn ltv_field_text(ltv: f64) -> String {
    if ltv > 0.0 {
        currency::to_fixed(ltv, LTV_PRECISION)
    } else {
        "0".to_string()
    }
}
