use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point drift in sums.
/// £24.53 = 2453 cents.
pub type Cents = i64;

/// Format cents as a human-readable currency string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("invalid money format")]
    InvalidFormat,

    #[error("amount cannot be negative")]
    Negative,
}

/// Parse a non-negative decimal string into cents.
/// Digits past the second decimal place are truncated.
/// Example: "145.50" -> 14550, "12.5" -> 1250, "89" -> 8900
pub fn parse_cents(input: &str) -> Result<Cents, ParseMoneyError> {
    let input = input.trim();
    if input.starts_with('-') {
        return Err(ParseMoneyError::Negative);
    }

    let (units_str, decimal_str) = input.split_once('.').unwrap_or((input, ""));
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseMoneyError::InvalidFormat);
    }
    if !units_str.chars().chain(decimal_str.chars()).all(|c| c.is_ascii_digit()) {
        return Err(ParseMoneyError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseMoneyError::InvalidFormat)?
    };

    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        // "12.5" means fifty cents
        1 => decimal_str.parse::<i64>().map_err(|_| ParseMoneyError::InvalidFormat)? * 10,
        _ => decimal_str[..2]
            .parse()
            .map_err(|_| ParseMoneyError::InvalidFormat)?,
    };

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseMoneyError::InvalidFormat)
}

/// Amount owed for business mileage, rounded to the nearest cent.
pub fn mileage_cents(miles: f64, cost_per_mile: f64) -> Cents {
    (miles * cost_per_mile * 100.0).round() as Cents
}
