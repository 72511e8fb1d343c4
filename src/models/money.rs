//! Money type for representing prices
//!
//! Internally stores amounts in cents (i64) so that sums are exact and two
//! prices compare equal exactly when they print the same.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg};

/// A price stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from a spreadsheet, in cents ($10 trillion)
    pub const MAX_CENTS: i64 = 1_000_000_000_000_000;

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expenses::models::Money;
    /// let amount = Money::from_cents(450); // $4.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Convert a spreadsheet number to cents, rounding half away from zero
    ///
    /// Returns `None` for NaN, infinities and amounts beyond
    /// [`Money::MAX_CENTS`].
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add two amounts, `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// The amount as a float, for CSV export
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Plain two-decimal rendering without a currency symbol ("-3.50")
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Parse a price from spreadsheet text
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "-$10.50", "$-10.50",
    /// "1,234.56", "(10.50)" and plain integers. Digits past the second decimal are rounded.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());
        let trimmed = s.trim();

        // Accounting format uses parentheses for negatives
        let (paren_negative, inner) = match trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => (true, inner.trim()),
            None => (false, trimmed),
        };

        // The sign may sit on either side of the currency symbol
        let (minus, inner) = match inner.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, inner),
        };
        let inner = inner.strip_prefix('$').unwrap_or(inner).trim_start();
        let (minus, inner) = match inner.strip_prefix('-') {
            Some(rest) if !minus => (true, rest.trim_start()),
            Some(_) => return Err(invalid()),
            None => (minus, inner),
        };
        let cleaned: String = inner.chars().filter(|c| *c != ',' && *c != ' ').collect();

        if cleaned.is_empty()
            || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.')
            || cleaned.matches('.').count() > 1
        {
            return Err(invalid());
        }

        let value: f64 = cleaned.parse().map_err(|_| invalid())?;
        let money = Self::from_f64(value).ok_or_else(invalid)?;

        Ok(if paren_negative ^ minus { -money } else { money })
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_f64_rounds() {
        assert_eq!(Money::from_f64(4.5).unwrap().cents(), 450);
        assert_eq!(Money::from_f64(2.75).unwrap().cents(), 275);
        assert_eq!(Money::from_f64(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_f64(-1.005).unwrap().cents(), -100);
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(725).to_decimal_string(), "7.25");
        assert_eq!(Money::from_cents(-300).to_decimal_string(), "-3.00");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("(12.00)").unwrap().cents(), -1200);
        assert_eq!(Money::parse(" 3.999 ").unwrap().cents(), 400);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("-$-5").is_err());
    }

    #[test]
    fn test_parse_sign_around_symbol() {
        assert_eq!(Money::parse("-$10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("$-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("($10.50)").unwrap().cents(), -1050);
        assert_eq!(Money::parse("$ -2").unwrap().cents(), -200);
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        assert_eq!(
            Money::from_f64(10_000_000_000_000.0),
            Some(Money::from_cents(Money::MAX_CENTS))
        );
        assert!(Money::from_f64(10_000_000_000_000.5).is_none());
        assert!(Money::from_f64(-90_000_000_000_000_000.0).is_none());
        assert!(Money::parse("90000000000000000").is_err());
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_cents(i64::MAX - 1);
        assert_eq!(a.checked_add(Money::from_cents(1)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(a.checked_add(Money::from_cents(2)), None);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
