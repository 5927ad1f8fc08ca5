//! # Memo Drafts
//!
//! Builds a [`Memo`] from what a clerk typed into the memo form.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoDraft::new(mobile, name, address, date)                           │
//! │       │                                                                 │
//! │       ├── .with_line(...) / push_line(...)   (any number of rows)      │
//! │       │                                                                 │
//! │       ├── customer_details()  → store finds or creates the customer    │
//! │       │                                                                 │
//! │       └── finalize(customer_id, now)                                   │
//! │              ├── validate customer fields                              │
//! │              ├── drop rows with a blank name or zero quantity          │
//! │              ├── validate remaining rows                               │
//! │              └── total = Σ line amounts (checked)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Quantity};
use crate::types::{CustomerSnapshot, Memo, MemoItem, Unit};
use crate::validation::{
    validate_address, validate_customer_name, validate_item_count, validate_item_name,
    validate_mobile, validate_quantity, validate_rate, ValidationResult,
};

/// One row of the memo form, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    pub item_name: String,
    pub quantity: Quantity,
    pub unit: Unit,
    pub rate: Money,
}

impl LineDraft {
    pub fn new(item_name: impl Into<String>, quantity: Quantity, unit: Unit, rate: Money) -> Self {
        LineDraft {
            item_name: item_name.into(),
            quantity,
            unit,
            rate,
        }
    }

    /// Live amount shown next to the row while it is being edited.
    pub fn amount(&self) -> Money {
        self.rate.times(self.quantity)
    }

    /// Rows the form leaves half-filled are skipped rather than rejected.
    fn is_filled(&self) -> bool {
        !self.item_name.trim().is_empty() && !self.quantity.is_zero()
    }
}

/// Validated customer fields from a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub mobile: String,
    pub name: String,
    pub address: String,
}

/// A memo being written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoDraft {
    pub mobile: String,
    pub name: String,
    pub address: String,
    pub date: DateTime<Utc>,
    pub lines: Vec<LineDraft>,
}

impl MemoDraft {
    pub fn new(
        mobile: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        MemoDraft {
            mobile: mobile.into(),
            name: name.into(),
            address: address.into(),
            date,
            lines: Vec::new(),
        }
    }

    /// Adds a row, builder style.
    pub fn with_line(
        mut self,
        item_name: impl Into<String>,
        quantity: Quantity,
        unit: Unit,
        rate: Money,
    ) -> Self {
        self.push_line(LineDraft::new(item_name, quantity, unit, rate));
        self
    }

    pub fn push_line(&mut self, line: LineDraft) {
        self.lines.push(line);
    }

    /// Removes the row at `index`, if present.
    pub fn remove_line(&mut self, index: usize) -> Option<LineDraft> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Running total of the rows that will be kept on finalize.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .filter(|l| l.is_filled())
            .map(LineDraft::amount)
            .sum()
    }

    /// Validates and trims the customer fields.
    pub fn customer_details(&self) -> ValidationResult<CustomerDetails> {
        Ok(CustomerDetails {
            mobile: validate_mobile(&self.mobile)?,
            name: validate_customer_name(&self.name)?,
            address: validate_address(&self.address)?,
        })
    }

    /// Turns the draft into a memo owned by `customer_id`.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for bad customer fields or a bad row
    /// - `CoreError::EmptyMemo` when no row has both a name and a quantity
    pub fn finalize(self, customer_id: &str, now: DateTime<Utc>) -> CoreResult<Memo> {
        let details = self.customer_details()?;

        let mut items = Vec::with_capacity(self.lines.len());
        for line in self.lines.into_iter().filter(LineDraft::is_filled) {
            let item_name = validate_item_name(&line.item_name)?;
            validate_quantity(line.quantity)?;
            validate_rate(line.rate)?;
            items.push(MemoItem::new(item_name, line.quantity, line.unit, line.rate));
        }

        if items.is_empty() {
            return Err(CoreError::EmptyMemo);
        }
        validate_item_count(items.len())?;

        let mut total_amount = Money::zero();
        for item in &items {
            total_amount = item
                .rate
                .checked_times(item.quantity)
                .and_then(|amount| total_amount.checked_add(amount))
                .ok_or_else(|| CoreError::AmountOverflow {
                    item_name: item.item_name.clone(),
                })?;
        }

        Ok(Memo {
            id: Uuid::new_v4().to_string(),
            customer: CustomerSnapshot {
                customer_id: customer_id.to_string(),
                mobile: details.mobile,
                name: details.name,
                address: details.address,
            },
            date: self.date,
            items,
            total_amount,
            created_at: now,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> MemoDraft {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        MemoDraft::new("01711223344", "Rahim", "Chawkbazar, Dhaka", date)
    }

    #[test]
    fn test_finalize_computes_total() {
        let memo = draft()
            .with_line("A", Quantity::whole(2), Unit::Yards, Money::from_taka(5))
            .with_line("B", Quantity::whole(1), Unit::Meters, Money::from_taka(10))
            .finalize("cust-1", Utc::now())
            .unwrap();

        assert_eq!(memo.total_amount, Money::from_taka(20));
        assert_eq!(memo.items.len(), 2);
        assert!(memo.is_consistent());
        assert_eq!(memo.customer.customer_id, "cust-1");
        assert_eq!(memo.customer.mobile, "01711223344");
    }

    #[test]
    fn test_finalize_skips_unfilled_rows() {
        let memo = draft()
            .with_line("Silk", Quantity::whole(3), Unit::Yards, Money::from_taka(40))
            .with_line("", Quantity::whole(2), Unit::Yards, Money::from_taka(99))
            .with_line("Cotton", Quantity::zero(), Unit::Yards, Money::from_taka(10))
            .finalize("cust-1", Utc::now())
            .unwrap();

        assert_eq!(memo.items.len(), 1);
        assert_eq!(memo.items[0].item_name, "Silk");
        assert_eq!(memo.total_amount, Money::from_taka(120));
    }

    #[test]
    fn test_draft_total_matches_finalized_total() {
        let d = draft()
            .with_line("Silk", Quantity::from_milli(2_500), Unit::Yards, Money::from_paisa(33_333))
            .with_line("", Quantity::whole(1), Unit::Yards, Money::from_taka(50));
        let live = d.total();
        let memo = d.finalize("cust-1", Utc::now()).unwrap();
        assert_eq!(live, memo.total_amount);
    }

    #[test]
    fn test_finalize_rejects_empty_memo() {
        let result = draft()
            .with_line("  ", Quantity::whole(1), Unit::Yards, Money::from_taka(5))
            .finalize("cust-1", Utc::now());
        assert!(matches!(result, Err(CoreError::EmptyMemo)));
    }

    #[test]
    fn test_finalize_rejects_missing_customer_fields() {
        let mut d = draft().with_line("Silk", Quantity::whole(1), Unit::Yards, Money::from_taka(5));
        d.address = String::new();
        assert!(matches!(
            d.finalize("cust-1", Utc::now()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_finalize_rejects_negative_rate() {
        let result = draft()
            .with_line("Silk", Quantity::whole(1), Unit::Yards, Money::from_paisa(-100))
            .finalize("cust-1", Utc::now());
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_finalize_rejects_rate_beyond_limit() {
        let rate: Money = "90000000000000000".parse().unwrap();
        let result = draft()
            .with_line("Silk", Quantity::whole(1000), Unit::Yards, rate)
            .finalize("cust-1", Utc::now());
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_finalize_at_limits_keeps_exact_total() {
        let rate = Money::from_paisa(crate::MAX_RATE_PAISA);
        let qty = Quantity::from_milli(crate::MAX_ITEM_QUANTITY_MILLI);
        let mut d = draft();
        for n in 0..crate::MAX_MEMO_ITEMS {
            d = d.with_line(format!("Bolt {}", n), qty, Unit::Meters, rate);
        }

        let memo = d.finalize("cust-1", Utc::now()).unwrap();
        let line = crate::MAX_RATE_PAISA * (crate::MAX_ITEM_QUANTITY_MILLI / 1000);
        assert_eq!(memo.items[0].amount().paisa(), line);
        assert_eq!(memo.total_amount.paisa(), line * crate::MAX_MEMO_ITEMS as i64);
        assert!(memo.is_consistent());
    }

    #[test]
    fn test_remove_line() {
        let mut d = draft()
            .with_line("Silk", Quantity::whole(1), Unit::Yards, Money::from_taka(5))
            .with_line("Linen", Quantity::whole(1), Unit::Yards, Money::from_taka(5));
        assert_eq!(d.remove_line(0).unwrap().item_name, "Silk");
        assert!(d.remove_line(5).is_none());
        assert_eq!(d.lines.len(), 1);
    }
}
