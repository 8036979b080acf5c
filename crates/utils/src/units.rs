use alloy_primitives::utils::{self, UnitsError};
use alloy_primitives::U256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error(transparent)]
    Units(#[from] UnitsError),
    #[error("negative amount {0}")]
    Negative(String),
}

/// Human-readable decimal string to smallest units, e.g. `"1.5"` with 6 decimals is `1500000`.
/// Negative amounts are rejected.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, ParseAmountError> {
    let amount = amount.trim();
    let parsed = utils::parse_units(amount, decimals)?;
    if parsed.is_negative() {
        return Err(ParseAmountError::Negative(amount.to_string()));
    }
    Ok(parsed.get_absolute())
}

/// Smallest units to a decimal string without trailing zeros: `1500000` with 6 decimals is `"1.5"`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let formatted = match utils::format_units(amount, decimals) {
        Ok(s) => s,
        Err(_) => return amount.to_string(),
    };
    match formatted.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{int}.{frac}")
            }
        }
        None => formatted,
    }
}

/// Fixed number of fractional digits, truncating the rest: `1234567` with 6 decimals and precision 2 is `"1.23"`.
pub fn format_token_amount(amount: U256, decimals: u8, precision: usize) -> String {
    let full = match utils::format_units(amount, decimals) {
        Ok(s) => s,
        Err(_) => return amount.to_string(),
    };
    let (int, frac) = full.split_once('.').unwrap_or((full.as_str(), ""));
    if precision == 0 {
        return int.to_string();
    }
    let mut frac: String = frac.chars().take(precision).collect();
    while frac.len() < precision {
        frac.push('0');
    }
    format!("{int}.{frac}")
}
