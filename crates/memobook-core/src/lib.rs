//! # memobook-core: Pure Business Logic for Memobook
//!
//! Everything a fabric shop's memo book needs that does not touch storage:
//! memo arithmetic, validation, the sales aggregation engine and report
//! assembly.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Memobook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                memobook-store (Lookup + Services)               │   │
//! │  │   customers by mobile, memos by date range, item catalog        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &[Memo], &Customer                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ memobook-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  memo   │ │ summary │ │ report  │  │   │
//! │  │   │  Memo   │ │  Money  │ │  Draft  │ │  daily  │ │ Sales   │  │   │
//! │  │   │Customer │ │Quantity │ │ finalize│ │  items  │ │ Report  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Memo, MemoItem, DailySales, ...)
//! - [`money`] - Integer Money (paisa) and Quantity (thousandths)
//! - [`memo`] - Memo form drafts and finalization
//! - [`summary`] - The sales aggregation engine
//! - [`report`] - Titles, file names and renderer-ready report data
//! - [`prefix`] - Prefix ranges for "starts with" lookups
//! - [`validation`] - Field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use memobook_core::{summarize_by_date_range, MemoDraft, Money, Quantity, Unit};
//!
//! let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
//! let memo = MemoDraft::new("01711223344", "Rahim", "Chawkbazar", date)
//!     .with_line("Silk", Quantity::from_milli(2_500), Unit::Yards, Money::from_taka(40))
//!     .finalize("customer-1", Utc::now())
//!     .unwrap();
//!
//! let summary = summarize_by_date_range(&[memo], &Utc);
//! assert_eq!(summary.total_amount, Money::from_taka(100));
//! assert_eq!(summary.daily_sales[0].total_memos, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memo;
pub mod money;
pub mod prefix;
pub mod report;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use memo::{CustomerDetails, LineDraft, MemoDraft};
pub use money::{Money, Quantity};
pub use report::{
    MemoReceipt, PlainTextRenderer, ReportAssembler, ReportRenderer, ReportSettings, SalesReport,
};
pub use summary::{
    summarize_by_date_range, summarize_for_customer, summarize_with, CustomerStatement,
    SalesSummary, SummaryOptions,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fewest digits accepted in a customer mobile number.
pub const MIN_MOBILE_DIGITS: usize = 10;

/// Most digits accepted in a customer mobile number (E.164 limit).
pub const MAX_MOBILE_DIGITS: usize = 15;

/// Maximum lines on a single memo.
pub const MAX_MEMO_ITEMS: usize = 100;

/// Maximum quantity on a single line, in thousandths (100,000 units).
///
/// Catches a clerk typing a rate into the quantity column.
pub const MAX_ITEM_QUANTITY_MILLI: i64 = 100_000_000;

/// Maximum rate per unit, in paisa (10,000,000 taka).
///
/// With the quantity and line limits, a memo total stays far inside `i64`.
pub const MAX_RATE_PAISA: i64 = 1_000_000_000;
