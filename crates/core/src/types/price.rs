//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are rupee amounts in the currency's standard unit (not paise).
//! The numeric model is currency-symbol-free; `Price::display` renders the
//! fixed "₹" symbol with Indian-system digit grouping for presentation only.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative rupee amount.
///
/// ## Examples
///
/// ```
/// use onyx_core::Price;
///
/// let price = Price::from_rupees(125_000);
/// assert_eq!(price.display(), "₹1,25,000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is negative.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole-rupee amount.
    #[must_use]
    pub fn from_rupees(rupees: u32) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with the fixed "₹" symbol and Indian-system
    /// grouping (e.g. `₹1,23,456.50`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("₹{}", group_indian(self.0))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Group a non-negative decimal in the Indian numbering system: the last
/// three integer digits form one group, every preceding pair another
/// (`1234567.5` becomes `12,34,567.5`).
fn group_indian(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let text = normalized.to_string();
    let (integer, fraction) = text
        .split_once('.')
        .map_or((text.as_str(), None), |(int, frac)| (int, Some(frac)));

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(text.len() + digits.len() / 2);
    let len = digits.len();
    for (i, ch) in digits.iter().enumerate() {
        let remaining = len - i;
        if i > 0 && (remaining == 3 || (remaining > 3 && remaining % 2 == 1)) {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match fraction {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}
