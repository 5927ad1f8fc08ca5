//! # Memo Repository
//!
//! Stored memos, fetched by customer and by date range.
//!
//! ## Date Range Scan
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  memos_by_date: BTreeSet<(DateTime<Utc>, memo id)>                      │
//! │                                                                         │
//! │  ... (01-04 17:30, m2) │ (01-04 18:00, m5) ... (01-06 17:59, m8) │ ...  │
//! │                        ▲                                       ▲        │
//! │                        └── range.utc_bounds(offset) ───────────┘        │
//! │                                                                         │
//! │  Scan ascending, then reverse: results come back newest first.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use memobook_core::Memo;
use std::ops::Bound;
use std::sync::Arc;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::range::DateRange;
use crate::store::{SharedTables, Tables};

/// Repository for memos.
#[derive(Debug, Clone)]
pub struct MemoRepository {
    tables: SharedTables,
    config: Arc<StoreConfig>,
}

impl MemoRepository {
    pub(crate) fn new(tables: SharedTables, config: Arc<StoreConfig>) -> Self {
        MemoRepository { tables, config }
    }

    /// Stores a finalized memo.
    ///
    /// ## Errors
    /// - `StoreError::Duplicate` when the memo id is taken
    /// - `StoreError::NotFound` when the memo's customer does not exist
    pub async fn insert(&self, memo: Memo) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        if tables.memos.contains_key(&memo.id) {
            return Err(StoreError::duplicate("Memo", memo.id));
        }
        if !tables.customers.contains_key(&memo.customer.customer_id) {
            return Err(StoreError::not_found("Customer", memo.customer.customer_id));
        }

        debug!(
            id = %memo.id,
            customer_id = %memo.customer.customer_id,
            items = memo.items.len(),
            total = %memo.total_amount,
            "Inserting memo"
        );

        tables.memos_by_date.insert((memo.date, memo.id.clone()));
        tables.memos.insert(memo.id.clone(), memo);
        Ok(())
    }

    /// Gets a memo by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Memo>> {
        let tables = self.tables.read().await;
        Ok(tables.memos.get(id).cloned())
    }

    /// A customer's memos, newest first, optionally limited to a date range.
    pub async fn list_by_customer(
        &self,
        customer_id: &str,
        range: Option<DateRange>,
    ) -> StoreResult<Vec<Memo>> {
        debug!(customer_id = %customer_id, ?range, "Listing memos by customer");

        let tables = self.tables.read().await;
        let memos: Vec<Memo> = self
            .scan(&tables, range)
            .filter(|memo| memo.customer.customer_id == customer_id)
            .cloned()
            .collect();

        debug!(count = memos.len(), "Customer memo lookup returned");
        Ok(memos)
    }

    /// Every memo dated within `range` (shop-local days), newest first.
    pub async fn list_by_date_range(&self, range: DateRange) -> StoreResult<Vec<Memo>> {
        debug!(start = %range.start(), end = %range.end(), "Listing memos by date range");

        let tables = self.tables.read().await;
        let memos: Vec<Memo> = self.scan(&tables, Some(range)).cloned().collect();

        debug!(count = memos.len(), "Date range lookup returned");
        Ok(memos)
    }

    /// Memos newest first, within `range` when given.
    fn scan<'t>(
        &self,
        tables: &'t Tables,
        range: Option<DateRange>,
    ) -> impl Iterator<Item = &'t Memo> + 't {
        let bounds = match range {
            Some(range) => key_bounds(range.utc_bounds(&self.config.utc_offset())),
            None => (Bound::Unbounded, Bound::Unbounded),
        };

        tables
            .memos_by_date
            .range(bounds)
            .rev()
            .filter_map(move |(_, id)| tables.memos.get(id))
    }
}

/// Key bounds covering every `(instant, id)` with `start <= instant < end`.
/// The empty string sorts before every id, so `(t, "")` sits just ahead of
/// all keys at instant `t`.
fn key_bounds(
    (start, end): (DateTime<Utc>, Option<DateTime<Utc>>),
) -> (Bound<(DateTime<Utc>, String)>, Bound<(DateTime<Utc>, String)>) {
    let lower = Bound::Included((start, String::new()));
    let upper = match end {
        Some(end) => Bound::Excluded((end, String::new())),
        None => Bound::Unbounded,
    };
    (lower, upper)
}

// =============================================================================
// Unit Tests
// =============================================================================
