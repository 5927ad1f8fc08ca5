//! # Memo Service
//!
//! Saving a memo from the memo form.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoDraft                                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  finalize  ── validation / empty memo ──► Err (nothing is written)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  customers.get_or_create(form details)   one write lock                │
//! │       ├── found   → use it as is (form edits do not update it)         │
//! │       └── missing → register the form details                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  items.remember(memo.items)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  memos.insert(memo)   snapshot = form details at save time             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use memobook_core::{Customer, Memo, MemoDraft};
use serde::Serialize;
use tracing::info;

use crate::error::StoreResult;
use crate::store::MemoryStore;

/// Outcome of [`MemoService::save_memo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedMemo {
    pub memo: Memo,
    pub customer: Customer,
    /// True when the mobile number was new and a customer was registered.
    pub customer_created: bool,
}

/// A customer with their memos, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerHistory {
    pub customer: Customer,
    pub memos: Vec<Memo>,
}

/// Memo form workflow.
#[derive(Debug, Clone)]
pub struct MemoService {
    store: MemoryStore,
}

impl MemoService {
    pub fn new(store: MemoryStore) -> Self {
        MemoService { store }
    }

    /// Validates and stores a memo, registering the customer on first sale.
    ///
    /// ## Errors
    /// - `StoreError::Core` for validation failures or an empty memo; no
    ///   customer is created in that case
    pub async fn save_memo(&self, draft: MemoDraft) -> StoreResult<SavedMemo> {
        let details = draft.customer_details()?;
        // validated up front; the owning id is filled in below
        let mut memo = draft.finalize("", Utc::now())?;

        let (customer, customer_created) = self.store.customers().get_or_create(details).await?;
        memo.customer.customer_id = customer.id.clone();

        self.store.items().remember(&memo.items).await?;
        self.store.memos().insert(memo.clone()).await?;

        info!(
            memo_id = %memo.id,
            customer_id = %customer.id,
            customer_created,
            total = %memo.total_amount,
            "Memo saved"
        );

        Ok(SavedMemo {
            memo,
            customer,
            customer_created,
        })
    }

    /// The customer registered under `mobile` and all their memos.
    ///
    /// ## Returns
    /// * `Ok(None)` - No customer has this mobile
    pub async fn customer_history(&self, mobile: &str) -> StoreResult<Option<CustomerHistory>> {
        let Some(customer) = self.store.customers().get_by_mobile(mobile).await? else {
            return Ok(None);
        };

        let memos = self.store.memos().list_by_customer(&customer.id, None).await?;
        Ok(Some(CustomerHistory { customer, memos }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::{MemoryStore, StoreConfig};
    use chrono::{TimeZone, Utc};
    use memobook_core::{CoreError, MemoDraft, Money, Quantity, Unit};

    fn draft(mobile: &str, name: &str) -> MemoDraft {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 6, 0, 0).unwrap();
        MemoDraft::new(mobile, name, "Islampur, Dhaka", date)
            .with_line("Silk", Quantity::whole(3), Unit::Yards, Money::from_taka(40))
    }

    #[tokio::test]
    async fn test_first_sale_registers_customer() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let saved = store
            .memo_service()
            .save_memo(draft("01711223344", "Rahim"))
            .await
            .unwrap();

        assert!(saved.customer_created);
        assert_eq!(saved.memo.customer.customer_id, saved.customer.id);
        assert_eq!(saved.memo.total_amount, Money::from_taka(120));

        let stats = store.stats().await;
        assert_eq!((stats.customers, stats.memos, stats.catalog_items), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_repeat_sale_reuses_customer_and_snapshots_form() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let service = store.memo_service();

        let first = service.save_memo(draft("01711223344", "Rahim")).await.unwrap();
        let second = service
            .save_memo(draft("01711223344", "Rahim Uddin"))
            .await
            .unwrap();

        assert!(!second.customer_created);
        assert_eq!(second.customer.id, first.customer.id);
        // the stored customer is untouched, the memo keeps what was typed
        assert_eq!(second.customer.name, "Rahim");
        assert_eq!(second.memo.customer.name, "Rahim Uddin");
        assert_eq!(store.stats().await.customers, 1);
    }

    #[tokio::test]
    async fn test_empty_memo_writes_nothing() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 6, 0, 0).unwrap();
        let empty = MemoDraft::new("01711223344", "Rahim", "Islampur", date).with_line(
            "",
            Quantity::whole(1),
            Unit::Yards,
            Money::from_taka(5),
        );

        let result = store.memo_service().save_memo(empty).await;
        assert!(matches!(result, Err(StoreError::Core(CoreError::EmptyMemo))));
        assert_eq!(store.stats().await.customers, 0);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let result = store.memo_service().save_memo(draft("", "Rahim")).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_sales_share_one_customer() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = store.memo_service();
            handles.push(tokio::spawn(async move {
                service.save_memo(draft("01711223344", "Rahim")).await.unwrap()
            }));
        }
        let mut created = 0;
        for handle in handles {
            created += usize::from(handle.await.unwrap().customer_created);
        }

        assert_eq!(created, 1);
        assert_eq!(store.stats().await.customers, 1);
        let statement = store
            .reports()
            .customer_statement("01711223344", None)
            .await
            .unwrap();
        assert_eq!(statement.statement.entries.len(), 16);
    }

    #[tokio::test]
    async fn test_customer_history() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let service = store.memo_service();
        service.save_memo(draft("01711223344", "Rahim")).await.unwrap();
        service.save_memo(draft("01711223344", "Rahim")).await.unwrap();

        let history = service.customer_history("01711223344").await.unwrap().unwrap();
        assert_eq!(history.memos.len(), 2);

        assert!(service.customer_history("01800000000").await.unwrap().is_none());
    }
}
