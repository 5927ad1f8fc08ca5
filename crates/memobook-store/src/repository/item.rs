//! # Item Catalog Repository
//!
//! Remembers every item name that has been sold, with the unit and rate it
//! last went for, so the memo form can suggest names as the clerk types.
//!
//! Names are matched case-insensitively; the catalog keeps the spelling of
//! the most recent sale.

use chrono::Utc;
use memobook_core::prefix::PrefixRange;
use memobook_core::{CatalogItem, MemoItem};
use std::sync::Arc;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::store::SharedTables;

/// Repository for item name suggestions.
#[derive(Debug, Clone)]
pub struct ItemCatalogRepository {
    tables: SharedTables,
    config: Arc<StoreConfig>,
}

impl ItemCatalogRepository {
    pub(crate) fn new(tables: SharedTables, config: Arc<StoreConfig>) -> Self {
        ItemCatalogRepository { tables, config }
    }

    /// Upserts the items of a memo into the catalog.
    ///
    /// Later lines win: an item sold twice on one memo keeps the second
    /// line's unit and rate. Blank names are skipped.
    ///
    /// ## Returns
    /// Number of names that were not in the catalog before.
    pub async fn remember(&self, items: &[MemoItem]) -> StoreResult<usize> {
        let now = Utc::now();
        let mut added = 0;

        let mut tables = self.tables.write().await;
        for item in items {
            let name = item.item_name.trim();
            if name.is_empty() {
                continue;
            }

            let entry = CatalogItem {
                item_name: name.to_string(),
                unit: item.unit,
                rate: item.rate,
                updated_at: now,
            };
            if tables.catalog.insert(catalog_key(name), entry).is_none() {
                added += 1;
            }
        }

        debug!(lines = items.len(), added, "Catalog updated");
        Ok(added)
    }

    /// Catalog entries whose name starts with `prefix`, in name order.
    ///
    /// ## Arguments
    /// * `prefix` - Partial item name (an empty prefix returns nothing)
    /// * `limit` - Maximum results; `None` uses the configured default
    pub async fn search_by_prefix(
        &self,
        prefix: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<CatalogItem>> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let limit = self.config.search_limit(limit);

        debug!(prefix = %prefix, limit, "Searching item catalog");

        let range = PrefixRange::new(&catalog_key(prefix));
        let tables = self.tables.read().await;
        let items: Vec<CatalogItem> = tables
            .catalog
            .range::<str, _>(range.bounds())
            .map(|(_, item)| item.clone())
            .take(limit)
            .collect();

        debug!(count = items.len(), "Catalog search returned items");
        Ok(items)
    }

    /// Exact (case-insensitive) lookup.
    pub async fn get(&self, item_name: &str) -> StoreResult<Option<CatalogItem>> {
        let tables = self.tables.read().await;
        Ok(tables.catalog.get(&catalog_key(item_name.trim())).cloned())
    }
}

fn catalog_key(name: &str) -> String {
    name.to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{MemoryStore, StoreConfig};
    use memobook_core::{MemoItem, Money, Quantity, Unit};

    fn line(name: &str, unit: Unit, taka: i64) -> MemoItem {
        MemoItem::new(name, Quantity::whole(1), unit, Money::from_taka(taka))
    }

    #[tokio::test]
    async fn test_remember_and_search() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let items = store.items();

        let added = items
            .remember(&[
                line("Silk", Unit::Yards, 40),
                line("Silk Georgette", Unit::Meters, 90),
                line("Cotton", Unit::Yards, 25),
                line("  ", Unit::Yards, 1),
            ])
            .await
            .unwrap();
        assert_eq!(added, 3);

        let hits = items.search_by_prefix("sil", None).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(names, vec!["Silk", "Silk Georgette"]);

        let limited = items.search_by_prefix("Silk", Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);

        assert!(items.search_by_prefix("", None).await.unwrap().is_empty());
        assert!(items.search_by_prefix("Linen", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remember_keeps_latest_rate() {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let items = store.items();

        items.remember(&[line("Silk", Unit::Yards, 40)]).await.unwrap();
        let added = items.remember(&[line("SILK", Unit::Meters, 45)]).await.unwrap();
        assert_eq!(added, 0);

        let silk = items.get("silk").await.unwrap().unwrap();
        assert_eq!(silk.item_name, "SILK");
        assert_eq!(silk.unit, Unit::Meters);
        assert_eq!(silk.rate, Money::from_taka(45));
    }
}
