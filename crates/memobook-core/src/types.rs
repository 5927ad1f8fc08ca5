//! # Domain Types
//!
//! Core domain types used throughout Memobook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Customer     │   │       Memo       │   │    MemoItem     │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)      │──►│  customer (snap) │   │  item_name      │      │
//! │  │  mobile (key)   │   │  date            │◄──│  quantity, unit │      │
//! │  │  name, address  │   │  items[]         │   │  rate           │      │
//! │  └─────────────────┘   │  total_amount    │   │  amount()       │      │
//! │                        └──────────────────┘   └─────────────────┘      │
//! │                                                                         │
//! │  Derived per report:  DailySales, ItemsSummary, ItemTally              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A memo copies the customer's mobile, name and address when it is created.
//! Later edits to the customer record do not reach old memos.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::{Money, Quantity};

// =============================================================================
// Unit
// =============================================================================

/// Unit a fabric item is measured and priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Yards,
    Meters,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::Yards, Unit::Meters];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Unit::Yards => "yards",
            Unit::Meters => "meters",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yards" | "yard" | "yd" => Ok(Unit::Yards),
            "meters" | "meter" | "m" => Ok(Unit::Meters),
            other => Err(CoreError::UnknownUnit(other.to_string())),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A shop customer. The mobile number is the practical lookup key, though
/// nothing guarantees it is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4), assigned by the store.
    pub id: String,

    pub mobile: String,

    /// Display name.
    pub name: String,

    /// Postal address printed on memos.
    pub address: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Freezes the customer's current details for a new memo.
    pub fn snapshot(&self) -> CustomerSnapshot {
        CustomerSnapshot {
            customer_id: self.id.clone(),
            mobile: self.mobile.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
        }
    }
}

/// Point-in-time copy of a customer's details, stored on each memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSnapshot {
    pub customer_id: String,
    pub mobile: String,
    pub name: String,
    pub address: String,
}

// =============================================================================
// Memo Item
// =============================================================================

/// A line on a sale memo.
///
/// The amount is not stored: [`MemoItem::amount`] always derives it from
/// quantity × rate, so the two can never disagree. Serialized lines carry
/// it as `amount` (see [`MemoItemRecord`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MemoItemRecord", from = "MemoItemRecord")]
pub struct MemoItem {
    pub item_name: String,
    pub quantity: Quantity,
    pub unit: Unit,
    /// Price per unit.
    pub rate: Money,
}

impl MemoItem {
    pub fn new(item_name: impl Into<String>, quantity: Quantity, unit: Unit, rate: Money) -> Self {
        MemoItem {
            item_name: item_name.into(),
            quantity,
            unit,
            rate,
        }
    }

    /// Line amount (rate × quantity, rounded to the paisa).
    #[inline]
    pub fn amount(&self) -> Money {
        self.rate.times(self.quantity)
    }
}

/// Serialized form of a [`MemoItem`], with the derived amount included for
/// renderers and the frontend.
///
/// On the way back in, `amount` is ignored and recomputed from quantity and
/// rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, rename = "MemoItem")]
pub struct MemoItemRecord {
    pub item_name: String,
    pub quantity: Quantity,
    pub unit: Unit,
    pub rate: Money,
    #[serde(default)]
    pub amount: Money,
}

impl From<MemoItem> for MemoItemRecord {
    fn from(item: MemoItem) -> Self {
        MemoItemRecord {
            amount: item.amount(),
            item_name: item.item_name,
            quantity: item.quantity,
            unit: item.unit,
            rate: item.rate,
        }
    }
}

impl From<MemoItemRecord> for MemoItem {
    fn from(record: MemoItemRecord) -> Self {
        MemoItem::new(record.item_name, record.quantity, record.unit, record.rate)
    }
}

// =============================================================================
// Memo
// =============================================================================

/// One recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Memo {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer details as they were when the memo was written.
    pub customer: CustomerSnapshot,

    /// When the sale took place.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Line items in entry order.
    #[ts(as = "Vec<MemoItemRecord>")]
    pub items: Vec<MemoItem>,

    /// Sum of item amounts, fixed at creation.
    pub total_amount: Money,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Memo {
    /// Recomputes the sum of the current line amounts.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(MemoItem::amount).sum()
    }

    /// True when the stored total still matches the lines.
    ///
    /// Nothing in the aggregation path calls this; memos are trusted as given.
    pub fn is_consistent(&self) -> bool {
        self.items_total() == self.total_amount
    }
}

// =============================================================================
// Item Tallies
// =============================================================================

/// Accumulated quantity for one item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemTally {
    pub quantity: Quantity,
    /// Unit of the first line seen with this name.
    pub unit: Unit,
}

/// One row of an [`ItemsSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemSummaryEntry {
    pub item_name: String,
    pub quantity: Quantity,
    pub unit: Unit,
}

impl ItemSummaryEntry {
    pub fn tally(&self) -> ItemTally {
        ItemTally {
            quantity: self.quantity,
            unit: self.unit,
        }
    }
}

/// Item name → tally, kept in first-occurrence order.
///
/// Backed by a `Vec`: a report carries tens of distinct items, so the linear
/// lookup in [`ItemsSummary::record`] stays cheap and the order is free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemsSummary(Vec<ItemSummaryEntry>);

impl ItemsSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one line's quantity under its item name.
    ///
    /// The unit of a new name is taken from this line; for a known name the
    /// unit is left as first recorded, even if this line uses another one.
    pub fn record(&mut self, item: &MemoItem) {
        match self.0.iter_mut().find(|e| e.item_name == item.item_name) {
            Some(entry) => entry.quantity += item.quantity,
            None => self.0.push(ItemSummaryEntry {
                item_name: item.item_name.clone(),
                quantity: item.quantity,
                unit: item.unit,
            }),
        }
    }

    pub fn get(&self, item_name: &str) -> Option<ItemTally> {
        self.0
            .iter()
            .find(|e| e.item_name == item_name)
            .map(ItemSummaryEntry::tally)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemSummaryEntry> {
        self.0.iter()
    }
}

// =============================================================================
// Daily Sales
// =============================================================================

/// Sales bucket for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySales {
    /// Local calendar date, serialized as `YYYY-MM-DD`.
    #[ts(as = "String")]
    pub date: NaiveDate,

    pub total_amount: Money,

    /// Number of memos merged into this day.
    pub total_memos: u32,

    /// Per-day item tally. Empty unless per-day tallies were requested.
    pub items_sold: ItemsSummary,
}

impl DailySales {
    pub fn empty(date: NaiveDate) -> Self {
        DailySales {
            date,
            total_amount: Money::zero(),
            total_memos: 0,
            items_sold: ItemsSummary::new(),
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A remembered item name with the unit and rate it was last sold at.
/// Feeds item-name suggestions when writing a memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    pub item_name: String,
    pub unit: Unit,
    pub rate: Money,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
