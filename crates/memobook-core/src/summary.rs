//! # Sales Aggregation
//!
//! Folds a list of memos into report data: per-day totals, a global item
//! tally and a grand total.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  memos (pre-filtered, newest first)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for each memo:                                                         │
//! │    day = memo.date in caller's timezone, truncated to the date          │
//! │    daily[day].total_amount += memo.total_amount                         │
//! │    daily[day].total_memos  += 1                                         │
//! │    items[line.item_name]   += line.quantity   (every line, any day)     │
//! │    total                   += memo.total_amount                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SalesSummary { daily_sales, items_summary, total_amount }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Days appear in first-occurrence order; nothing is re-sorted.
//! - `total_amount` equals the sum of all daily totals.
//! - Memos are not checked: mismatched totals or mixed units flow through.
//! - Pure and total. An empty input yields an empty summary.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;
use crate::report::date_range_label;
use crate::types::{Customer, DailySales, ItemsSummary, Memo};

// =============================================================================
// Output Types
// =============================================================================

/// Result of summarizing a date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub daily_sales: Vec<DailySales>,
    pub items_summary: ItemsSummary,
    pub total_amount: Money,
}

impl SalesSummary {
    /// Number of memos across all days.
    pub fn total_memos(&self) -> u32 {
        self.daily_sales.iter().map(|d| d.total_memos).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.daily_sales.is_empty()
    }
}

/// A single customer's statement: one entry per memo instead of per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerStatement {
    /// `Customer Summary - {name} ({range})`
    pub title: String,
    pub customer: Customer,
    /// One synthetic bucket per memo (`total_memos == 1`), in input order.
    pub entries: Vec<DailySales>,
    pub items_summary: ItemsSummary,
    pub total_amount: Money,
}

/// Knobs for [`summarize_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Also fill `DailySales::items_sold` for each day.
    pub per_day_items: bool,
}

// =============================================================================
// Engine
// =============================================================================

/// Groups memos by local calendar day.
///
/// `tz` decides where a day starts; pass `chrono::Local`, `Utc` or a
/// `FixedOffset`. `items_sold` on each day is left empty.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use memobook_core::summary::summarize_by_date_range;
///
/// let summary = summarize_by_date_range(&[], &Utc);
/// assert!(summary.daily_sales.is_empty());
/// assert!(summary.total_amount.is_zero());
/// ```
pub fn summarize_by_date_range<Tz: TimeZone>(memos: &[Memo], tz: &Tz) -> SalesSummary {
    summarize_with(memos, tz, SummaryOptions::default())
}

/// [`summarize_by_date_range`] with options.
pub fn summarize_with<Tz: TimeZone>(memos: &[Memo], tz: &Tz, options: SummaryOptions) -> SalesSummary {
    let mut daily_sales: Vec<DailySales> = Vec::new();
    let mut slots: HashMap<NaiveDate, usize> = HashMap::new();
    let mut items_summary = ItemsSummary::new();
    let mut total_amount = Money::zero();

    for memo in memos {
        let day = local_day(memo.date, tz);
        let slot = *slots.entry(day).or_insert_with(|| {
            daily_sales.push(DailySales::empty(day));
            daily_sales.len() - 1
        });

        let bucket = &mut daily_sales[slot];
        bucket.total_amount += memo.total_amount;
        bucket.total_memos += 1;
        total_amount += memo.total_amount;

        for item in &memo.items {
            items_summary.record(item);
            if options.per_day_items {
                bucket.items_sold.record(item);
            }
        }
    }

    SalesSummary {
        daily_sales,
        items_summary,
        total_amount,
    }
}

/// Builds a customer statement without day grouping.
///
/// `range` is the requested date window, used only for the title
/// (`None` reads "All Time").
pub fn summarize_for_customer<Tz: TimeZone>(
    memos: &[Memo],
    customer: &Customer,
    range: Option<(NaiveDate, NaiveDate)>,
    tz: &Tz,
) -> CustomerStatement {
    let (items_summary, total_amount) = tally(memos);

    let entries = memos
        .iter()
        .map(|memo| DailySales {
            date: local_day(memo.date, tz),
            total_amount: memo.total_amount,
            total_memos: 1,
            items_sold: ItemsSummary::new(),
        })
        .collect();

    CustomerStatement {
        title: format!("Customer Summary - {} ({})", customer.name, date_range_label(range)),
        customer: customer.clone(),
        entries,
        items_summary,
        total_amount,
    }
}

/// Item tally and grand total over every memo, ignoring dates.
pub fn tally(memos: &[Memo]) -> (ItemsSummary, Money) {
    let mut items = ItemsSummary::new();
    let mut total = Money::zero();
    for memo in memos {
        total += memo.total_amount;
        for item in &memo.items {
            items.record(item);
        }
    }
    (items, total)
}

/// Calendar date of `instant` as seen in `tz`.
pub fn local_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

// =============================================================================
// Unit Tests
// =============================================================================
