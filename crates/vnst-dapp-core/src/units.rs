//! Conversion between base-unit integers and their decimal display form.

use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::U256;
use thiserror::Error;

pub const TOKEN_DECIMALS: u8 = 18;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not a decimal number: {0}")]
    NotNumeric(String),
    #[error("amount has more than 18 fractional digits")]
    TooPrecise,
    #[error("amount must be greater than zero")]
    NotPositive,
}

/// Formats an 18-decimal amount without trailing fractional zeros.
pub fn format_amount(amount: U256) -> String {
    let formatted = match format_units(amount, TOKEN_DECIMALS) {
        Ok(s) => s,
        // format_units only fails on an invalid unit, which TOKEN_DECIMALS is not.
        Err(_) => return amount.to_string(),
    };
    trim_fraction(&formatted)
}

fn trim_fraction(s: &str) -> String {
    match s.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_owned()
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => s.to_owned(),
    }
}

/// Parses user input into base units. Only strictly positive plain decimals
/// are accepted.
pub fn parse_amount(input: &str) -> Result<U256, AmountError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
        return Err(AmountError::NotNumeric(raw.to_owned()));
    }
    if frac.len() > TOKEN_DECIMALS as usize {
        return Err(AmountError::TooPrecise);
    }

    let normalized = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if frac.is_empty() { "0" } else { frac }
    );
    let value = parse_units(&normalized, TOKEN_DECIMALS)
        .map_err(|e| AmountError::NotNumeric(format!("{raw}: {e}")))?
        .get_absolute();
    if value.is_zero() {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}
