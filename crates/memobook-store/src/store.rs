//! # Memory Store
//!
//! The shared tables behind every repository.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Memory Store                                       │
//! │                                                                         │
//! │  MemoryStore::new(config)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │        Arc<RwLock<Tables>>                                  │       │
//! │  │                                                             │       │
//! │  │  customers            id     → Customer                     │       │
//! │  │  customers_by_mobile  mobile → [id, ...]   (prefix scans)   │       │
//! │  │  memos                id     → Memo                         │       │
//! │  │  memos_by_date        (date, id)           (range scans)    │       │
//! │  │  catalog              name   → CatalogItem (prefix scans)   │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │       │                                                                 │
//! │       │ cheap clones of the Arc                                         │
//! │       ▼                                                                 │
//! │  store.customers()  store.memos()  store.items()                       │
//! │  (many readers at once, one writer at a time)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use memobook_core::{CatalogItem, Customer, Memo};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::repository::customer::CustomerRepository;
use crate::repository::item::ItemCatalogRepository;
use crate::repository::memo::MemoRepository;
use crate::service::memo::MemoService;
use crate::service::report::ReportService;

// =============================================================================
// Tables
// =============================================================================

/// Records plus the ordered indexes the lookups scan.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub customers: HashMap<String, Customer>,

    /// Mobile numbers are not unique; ids keep insertion order.
    pub customers_by_mobile: BTreeMap<String, Vec<String>>,

    pub memos: HashMap<String, Memo>,

    pub memos_by_date: BTreeSet<(DateTime<Utc>, String)>,

    /// Keyed by lowercased item name.
    pub catalog: BTreeMap<String, CatalogItem>,
}

pub(crate) type SharedTables = Arc<RwLock<Tables>>;

/// Row counts, for health output and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub customers: usize,
    pub memos: usize,
    pub catalog_items: usize,
}

// =============================================================================
// Memory Store
// =============================================================================

/// Main store handle providing repository and service access.
///
/// ## Usage
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use memobook_store::{MemoryStore, StoreConfig};
///
/// let store = MemoryStore::new(StoreConfig::default())?;
/// let hits = store.customers().search_by_mobile_prefix("0171", None).await?;
/// assert!(hits.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: SharedTables,
    config: Arc<StoreConfig>,
}

impl MemoryStore {
    /// Creates an empty store.
    ///
    /// ## Errors
    /// `StoreError::InvalidConfig` when `config` fails validation.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        info!(
            shop = %config.shop.name,
            utc_offset_minutes = config.shop.utc_offset_minutes,
            "Initializing memory store"
        );

        Ok(MemoryStore {
            tables: Arc::new(RwLock::new(Tables::default())),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.tables.clone(), self.config.clone())
    }

    /// Returns the memo repository.
    pub fn memos(&self) -> MemoRepository {
        MemoRepository::new(self.tables.clone(), self.config.clone())
    }

    /// Returns the item catalog repository.
    pub fn items(&self) -> ItemCatalogRepository {
        ItemCatalogRepository::new(self.tables.clone(), self.config.clone())
    }

    /// Memo form workflow (find-or-create customer, save memo).
    pub fn memo_service(&self) -> MemoService {
        MemoService::new(self.clone())
    }

    /// Sales summaries and customer statements.
    pub fn reports(&self) -> ReportService {
        ReportService::new(self.clone())
    }

    pub async fn stats(&self) -> StoreStats {
        let tables = self.tables.read().await;
        StoreStats {
            customers: tables.customers.len(),
            memos: tables.memos.len(),
            catalog_items: tables.catalog.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
