use std::fmt;

use rust_decimal::Decimal;

/// Money is represented as an arbitrary-precision decimal, never as a float.
/// Scale is preserved as entered, so 50 and 50.00 compare equal.
pub type Amount = Decimal;

/// Format an amount as a human-readable string with at least two decimals.
/// Example: 150 -> "150.00", 0.125 -> "0.125", -5 -> "-5.00"
pub fn format_amount(amount: Amount) -> String {
    let mut normalized = amount.normalize();
    if normalized.scale() < 2 {
        normalized.rescale(2);
    }
    normalized.to_string()
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "100" -> 100
///
/// The sign is kept as given; rejecting negative amounts is up to the caller.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    Decimal::from_str_exact(input).map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat(input) => {
                write!(f, "invalid money format: '{}'", input)
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}
