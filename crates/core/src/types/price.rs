//! Currency-agnostic prices using decimal arithmetic.
//!
//! Catalog fixtures publish prices as display ranges (`"450 ETB - 850 ETB"`).
//! The cart needs a single unit price, which is the midpoint of the range.
//! No conversion, tax or shipping logic exists anywhere in the system, so
//! [`Price`] carries no currency code.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit or line price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price (empty cart total).
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Line price for `quantity` units, saturating at the largest
    /// representable amount.
    #[must_use]
    pub fn times(self, quantity: u64) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Errors that can occur when parsing a [`PriceRange`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceRangeError {
    /// A bound contained no digits at all.
    #[error("price bound has no digits: {0:?}")]
    NoDigits(String),
    /// More than two bounds were given.
    #[error("price range must have one or two bounds: {0:?}")]
    TooManyBounds(String),
    /// The lower bound is greater than the upper bound.
    #[error("price range is inverted: {0:?}")]
    Inverted(String),
}

/// A displayed price range such as `"3120 ETB - 5180 ETB"`.
///
/// The original display string is retained for labels; `min`/`max` are the
/// digits of each bound with any unit text stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriceRange {
    label: String,
    min: Price,
    max: Price,
}

impl PriceRange {
    /// Parse a range from its display form.
    ///
    /// Accepts either a single bound (`"1500 ETB"`) or two bounds separated
    /// by `" - "`. Non-digit characters inside a bound are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceRangeError`] if a bound has no digits, there are more
    /// than two bounds, or the bounds are inverted.
    pub fn parse(s: &str) -> Result<Self, PriceRangeError> {
        let bounds = s
            .split(" - ")
            .map(parse_bound)
            .collect::<Result<Vec<_>, _>>()?;

        let (min, max) = match bounds.as_slice() {
            [single] => (*single, *single),
            [min, max] => (*min, *max),
            _ => return Err(PriceRangeError::TooManyBounds(s.to_owned())),
        };

        if min > max {
            return Err(PriceRangeError::Inverted(s.to_owned()));
        }

        Ok(Self {
            label: s.to_owned(),
            min,
            max,
        })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> Price {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> Price {
        self.max
    }

    /// The unit price charged when the item is added to the cart.
    #[must_use]
    pub fn midpoint(&self) -> Price {
        Price((self.min.0 + self.max.0) / Decimal::TWO)
    }

    /// The original display string.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn parse_bound(bound: &str) -> Result<Price, PriceRangeError> {
    let digits: String = bound.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(PriceRangeError::NoDigits(bound.to_owned()));
    }
    digits
        .parse::<Decimal>()
        .map(Price)
        .map_err(|_| PriceRangeError::NoDigits(bound.to_owned()))
}

impl TryFrom<String> for PriceRange {
    type Error = PriceRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PriceRange> for String {
    fn from(range: PriceRange) -> Self {
        range.label
    }
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
