//! # memobook-store: Lookup Service for Memobook
//!
//! Finds the records the aggregation engine works on, and runs the memo and
//! report workflows on top of them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Memobook Data Flow                               │
//! │                                                                         │
//! │  Memo form / Sales summary screen / Customer history screen            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  memobook-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  MemoryStore  │    │  Repositories │    │   Services   │  │   │
//! │  │   │  (store.rs)   │◄───│ Customer      │◄───│ MemoService  │  │   │
//! │  │   │  RwLock'd     │    │ Memo          │    │ ReportService│  │   │
//! │  │   │  tables       │    │ ItemCatalog   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────┬───────┘  │   │
//! │  │                                                     │          │   │
//! │  └─────────────────────────────────────────────────────┼──────────┘   │
//! │                                                        ▼              │
//! │                                memobook-core: summarize + assemble     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The shared tables and the store handle
//! - [`repository`] - Customer, memo and item catalog repositories
//! - [`service`] - Memo save and report workflows
//! - [`range`] - Inclusive calendar-day ranges
//! - [`config`] - Shop configuration (TOML + environment)
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use memobook_core::{MemoDraft, Money, Quantity, Unit};
//! use memobook_store::{DateRange, MemoryStore, StoreConfig};
//!
//! let store = MemoryStore::new(StoreConfig::default())?;
//!
//! let date = Utc.with_ymd_and_hms(2024, 1, 5, 4, 0, 0).unwrap();
//! let draft = MemoDraft::new("01711223344", "Rahim", "Islampur, Dhaka", date)
//!     .with_line("Silk", Quantity::whole(3), Unit::Yards, Money::from_taka(40));
//! store.memo_service().save_memo(draft).await?;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let out = store.reports().sales_summary(DateRange::single_day(day)).await?;
//! assert_eq!(out.summary.total_amount, Money::from_taka(120));
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod range;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use range::DateRange;
pub use store::{MemoryStore, StoreStats};

// Repository re-exports for convenience
pub use repository::customer::{CustomerRepository, MobileLookup};
pub use repository::item::ItemCatalogRepository;
pub use repository::memo::MemoRepository;

pub use service::memo::{CustomerHistory, MemoService, SavedMemo};
pub use service::report::{ReportService, StatementReport, SummaryReport};
