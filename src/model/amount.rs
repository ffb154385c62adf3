//! Amount type for handling monetary values with optional currency symbols.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include a currency symbol and thousands separators.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Sub;
use std::str::FromStr;

/// Currency symbols that may prefix a stored amount. Longer symbols come first so that `R$` is
/// stripped whole rather than leaving an `R` behind.
const SYMBOLS: [&str; 4] = ["R$", "US$", "$", "€"];

/// Represents a monetary magnitude.
///
/// Parsing is lenient about presentation: a currency symbol and thousands separators are
/// accepted. When both `.` and `,` appear, whichever comes last is the decimal separator. A lone
/// `,` is read as a decimal comma.
///
/// # Examples
///
/// ```
/// # use gofinances::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("R$ 1.234,50").unwrap();
/// let b = Amount::from_str("1,234.50").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1234.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// Adds `rhs`, returning `None` if the result does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.value.checked_add(rhs.value).map(Amount::new)
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let without_symbol = SYMBOLS
            .iter()
            .find_map(|symbol| unsigned.strip_prefix(symbol))
            .unwrap_or(unsigned)
            .trim();

        let normalized = normalize_separators(without_symbol);
        let value = Decimal::from_str(&normalized).map_err(AmountError)?;
        Ok(Amount::new(if negative { -value } else { value }))
    }
}

/// Removes thousands separators and converts the decimal separator to `.`.
fn normalize_separators(s: &str) -> String {
    let last_dot = s.rfind('.');
    let last_comma = s.rfind(',');
    let decimal = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                ','
            } else {
                '.'
            }
        }
        (None, Some(_)) => ',',
        _ => '.',
    };
    s.chars()
        .filter_map(|c| match c {
            c if c == decimal => Some('.'),
            '.' | ',' | ' ' | '\u{a0}' => None,
            c => Some(c),
        })
        .collect()
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

/// Panics on overflow, like `Decimal`. The difference of two non-negative amounts always fits.
impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount::new(self.value - rhs.value)
    }
}
