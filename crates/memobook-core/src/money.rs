//! # Money and Quantity
//!
//! Integer arithmetic for every amount and measured length in a memo.
//!
//! ## Why Integers?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0.1 + 0.2 = 0.30000000000000004      (f64)                             │
//! │                                                                         │
//! │  Money     → paisa        (i64, 1 taka = 100 paisa)                     │
//! │  Quantity  → milli-units  (i64, 2.5 yards = 2500)                       │
//! │                                                                         │
//! │  Totals and item tallies are plain integer sums: exact, order-free.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The only rounding in the system happens once per line, when a quantity is
//! multiplied by a rate (see [`Money::times`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

/// Number of decimal places kept for quantities.
pub const QUANTITY_SCALE: u32 = 3;

const MILLI: i64 = 1000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paisa (the smallest currency unit).
///
/// ## Where Money is Used
/// ```text
/// MemoItem.rate ──► MemoItem.amount ──► Memo.total_amount
///                                            │
///                  DailySales.total_amount ◄─┴─► SalesSummary.total_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa.
    ///
    /// ## Example
    /// ```rust
    /// use memobook_core::money::Money;
    ///
    /// let rate = Money::from_paisa(12050); // 120.50
    /// assert_eq!(rate.paisa(), 12050);
    /// ```
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole taka.
    ///
    /// ```rust
    /// use memobook_core::money::Money;
    ///
    /// assert_eq!(Money::from_taka(120).paisa(), 12000);
    /// ```
    #[inline]
    pub const fn from_taka(taka: i64) -> Self {
        Money(taka * 100)
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-taka portion.
    #[inline]
    pub const fn taka(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a per-unit rate by a measured quantity.
    ///
    /// The product is computed in `i128` and rounded half away from zero to
    /// the nearest paisa.
    ///
    /// ## Example
    /// ```rust
    /// use memobook_core::money::{Money, Quantity};
    ///
    /// let rate = Money::from_taka(150);           // 150.00 per yard
    /// let qty = Quantity::from_milli(2_500);      // 2.5 yards
    /// assert_eq!(rate.times(qty), Money::from_taka(375));
    ///
    /// let odd = Money::from_paisa(333);           // 3.33 per meter
    /// let third = Quantity::from_milli(1_500);    // 1.5 meters
    /// assert_eq!(odd.times(third).paisa(), 500);  // 4.995 → 5.00
    /// ```
    ///
    /// Saturates at the `i64` bounds; use [`Money::checked_times`] where an
    /// out-of-range amount must be reported.
    pub fn times(&self, quantity: Quantity) -> Money {
        self.checked_times(quantity).unwrap_or(if self.is_negative() != quantity.is_negative() {
            Money(i64::MIN)
        } else {
            Money(i64::MAX)
        })
    }

    /// Like [`Money::times`], but `None` when the amount does not fit.
    pub fn checked_times(&self, quantity: Quantity) -> Option<Money> {
        let product = i128::from(self.0) * i128::from(quantity.milli());
        let half = i128::from(MILLI / 2);
        let rounded = if product >= 0 {
            (product + half) / i128::from(MILLI)
        } else {
            (product - half) / i128::from(MILLI)
        };
        i64::try_from(rounded).ok().map(Money)
    }

    /// Checked addition; `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Formats the amount with a currency label, e.g. `BDT. 120.00`.
    pub fn with_label(&self, label: &str) -> String {
        if label.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", label, self)
        }
    }
}

/// Plain decimal form: `120.00`, `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.taka().abs(), self.paisa_part())
    }
}

/// Parses `"120"`, `"120.5"` or `"120.50"` (at most two decimals).
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s, 2)
            .map(Money)
            .map_err(|reason| CoreError::InvalidAmount {
                input: s.to_string(),
                reason,
            })
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A measured length of fabric, in thousandths of the item's unit.
///
/// Quantities are never negative in valid memos, but the type does not
/// enforce it: the aggregation engine sums whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths of a unit.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Creates a quantity of whole units.
    ///
    /// ```rust
    /// use memobook_core::money::Quantity;
    ///
    /// assert_eq!(Quantity::whole(3).milli(), 3000);
    /// ```
    #[inline]
    pub const fn whole(units: i64) -> Self {
        Quantity(units * MILLI)
    }

    /// Returns the quantity in thousandths.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// Shortest decimal form: `3`, `2.5`, `0.125`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / MILLI).abs();
        let frac = (self.0 % MILLI).abs();
        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }
        let digits = format!("{:03}", frac);
        write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

/// Parses `"3"`, `"2.5"` or `"0.125"` (at most three decimals).
impl FromStr for Quantity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s, QUANTITY_SCALE)
            .map(Quantity)
            .map_err(|reason| CoreError::InvalidQuantity {
                input: s.to_string(),
                reason,
            })
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), Add::add)
    }
}

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses a plain decimal string into an integer scaled by `10^scale`.
fn parse_fixed(input: &str, scale: u32) -> Result<i64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty value".to_string());
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err("no digits".to_string());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err("must contain only digits and one decimal point".to_string());
    }
    if frac.len() > scale as usize {
        return Err(format!("at most {} decimal places allowed", scale));
    }

    let factor = 10_i64.pow(scale);
    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| "value is too large".to_string())?
    };
    let frac_value: i64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = scale as usize);
        padded.parse().map_err(|_| "invalid fraction".to_string())?
    };

    let value = whole_value
        .checked_mul(factor)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| "value is too large".to_string())?;

    Ok(if negative { -value } else { value })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(12050);
        assert_eq!(money.paisa(), 12050);
        assert_eq!(money.taka(), 120);
        assert_eq!(money.paisa_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paisa(12050).to_string(), "120.50");
        assert_eq!(Money::from_taka(5).to_string(), "5.00");
        assert_eq!(Money::from_paisa(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_taka(170).with_label("BDT."), "BDT. 170.00");
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("120".parse::<Money>().unwrap(), Money::from_taka(120));
        assert_eq!("120.5".parse::<Money>().unwrap(), Money::from_paisa(12050));
        assert_eq!(".75".parse::<Money>().unwrap(), Money::from_paisa(75));
        assert!("12.345".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_taka(10);
        let b = Money::from_taka(5);
        assert_eq!((a + b).paisa(), 1500);
        assert_eq!((a - b).paisa(), 500);

        let total: Money = [a, b, Money::from_paisa(1)].iter().sum();
        assert_eq!(total.paisa(), 1501);
    }

    #[test]
    fn test_times_whole_and_fractional() {
        assert_eq!(Money::from_taka(5).times(Quantity::whole(2)), Money::from_taka(10));
        assert_eq!(
            Money::from_taka(150).times(Quantity::from_milli(2_500)),
            Money::from_taka(375)
        );
        // 1.333 × 1.00 = 1.333 → 1.33
        assert_eq!(
            Money::from_taka(1).times(Quantity::from_milli(1_333)).paisa(),
            133
        );
        // 0.005 × 1.00 = 0.005 → 0.01 (half rounds away from zero)
        assert_eq!(Money::from_taka(1).times(Quantity::from_milli(5)).paisa(), 1);
        assert!(Money::from_taka(99).times(Quantity::zero()).is_zero());
    }

    #[test]
    fn test_times_out_of_range() {
        let huge = Money::from_paisa(9_000_000_000_000_000_000 / 1000);
        let qty = Quantity::whole(1_000_000);
        assert_eq!(huge.checked_times(qty), None);
        assert_eq!(huge.times(qty), Money::from_paisa(i64::MAX));
        assert_eq!(huge.times(Quantity::from_milli(-1_000_000_000)), Money::from_paisa(i64::MIN));

        assert_eq!(
            Money::from_taka(2).checked_times(Quantity::whole(3)),
            Some(Money::from_taka(6))
        );
        assert_eq!(Money::from_paisa(i64::MAX).checked_add(Money::from_paisa(1)), None);
        assert_eq!(
            Money::from_taka(1).checked_add(Money::from_taka(2)),
            Some(Money::from_taka(3))
        );
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::whole(3).to_string(), "3");
        assert_eq!(Quantity::from_milli(2_500).to_string(), "2.5");
        assert_eq!(Quantity::from_milli(125).to_string(), "0.125");
        assert_eq!(Quantity::from_milli(-1_250).to_string(), "-1.25");
    }

    #[test]
    fn test_quantity_parse() {
        assert_eq!("3".parse::<Quantity>().unwrap(), Quantity::whole(3));
        assert_eq!("2.5".parse::<Quantity>().unwrap(), Quantity::from_milli(2_500));
        assert_eq!(" 0.125 ".parse::<Quantity>().unwrap(), Quantity::from_milli(125));
        assert!("1.2345".parse::<Quantity>().is_err());
        assert!("1.2.3".parse::<Quantity>().is_err());
        assert!("two".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_quantity_sum_is_exact() {
        let parts = vec![Quantity::from_milli(100); 10];
        let total: Quantity = parts.into_iter().sum();
        assert_eq!(total, Quantity::whole(1));
    }
}
