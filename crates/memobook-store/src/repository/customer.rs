//! # Customer Repository
//!
//! Customer records, looked up by mobile number.
//!
//! ## Mobile Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Clerk types: "0171"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  customers_by_mobile (sorted)                                          │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ 01611000000 → [c7]                      │                           │
//! │  │ 01711223344 → [c1]                      │ ← in ["0171", "0172")    │
//! │  │ 01711998877 → [c3, c9]                  │ ← in ["0171", "0172")    │
//! │  │ 01811000000 → [c4]                      │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [c1, c3, c9] (mobile order, then creation order)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use memobook_core::prefix::{best_match, PrefixRange};
use memobook_core::validation::{
    validate_address, validate_customer_name, validate_mobile, validate_mobile_prefix,
};
use memobook_core::{Customer, CustomerDetails};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::{SharedTables, Tables};

/// Result of [`CustomerRepository::lookup_by_mobile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MobileLookup {
    /// Customers whose mobile starts with the query, up to the limit.
    pub matches: Vec<Customer>,

    /// The exact mobile if registered, otherwise the shortest match.
    /// Chosen from every match, not only those within the limit.
    pub best: Option<Customer>,
}

/// Repository for customer records.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    tables: SharedTables,
    config: Arc<StoreConfig>,
}

impl CustomerRepository {
    pub(crate) fn new(tables: SharedTables, config: Arc<StoreConfig>) -> Self {
        CustomerRepository { tables, config }
    }

    /// Registers a new customer with a fresh id.
    ///
    /// Fields are validated and trimmed. A mobile number already in use is
    /// accepted; it just gains another customer.
    pub async fn create(&self, details: CustomerDetails) -> StoreResult<Customer> {
        let customer = new_customer(&details)?;

        let mut tables = self.tables.write().await;
        register(&mut tables, customer.clone());

        debug!(id = %customer.id, mobile = %customer.mobile, "Customer created");
        Ok(customer)
    }

    /// Returns the first customer registered under the mobile in `details`,
    /// registering one when there is none.
    ///
    /// The lookup and the insert happen under one write lock, so concurrent
    /// first sales to the same number end up with a single customer. An
    /// existing customer is returned as stored; `details` does not update it.
    ///
    /// ## Returns
    /// The customer, and `true` when it was created by this call.
    pub async fn get_or_create(&self, details: CustomerDetails) -> StoreResult<(Customer, bool)> {
        let customer = new_customer(&details)?;

        let mut tables = self.tables.write().await;
        if let Some(existing) = first_with_mobile(&tables, &customer.mobile) {
            let existing = existing.clone();
            debug!(id = %existing.id, "Existing customer for mobile");
            return Ok((existing, false));
        }

        register(&mut tables, customer.clone());
        debug!(id = %customer.id, mobile = %customer.mobile, "Customer created");
        Ok((customer, true))
    }

    /// Gets a customer by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.get(id).cloned())
    }

    /// Gets the first customer registered under exactly `mobile`.
    pub async fn get_by_mobile(&self, mobile: &str) -> StoreResult<Option<Customer>> {
        let mobile = mobile.trim();
        debug!(mobile = %mobile, "Looking up customer by mobile");

        let tables = self.tables.read().await;
        Ok(first_with_mobile(&tables, mobile).cloned())
    }

    /// Customers whose mobile starts with `prefix`, for search-as-you-type.
    ///
    /// ## Arguments
    /// * `prefix` - Digits typed so far (empty matches everyone)
    /// * `limit` - Maximum results; `None` uses the configured default
    ///
    /// ## Errors
    /// `StoreError::Validation` when the prefix contains anything but digits
    /// and a leading `+`.
    pub async fn search_by_mobile_prefix(
        &self,
        prefix: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Customer>> {
        let prefix = validate_mobile_prefix(prefix)?;
        let limit = self.config.search_limit(limit);

        debug!(prefix = %prefix, limit, "Searching customers by mobile prefix");

        let range = PrefixRange::new(&prefix);
        let tables = self.tables.read().await;
        let customers: Vec<Customer> = tables
            .customers_by_mobile
            .range::<str, _>(range.bounds())
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| tables.customers.get(id))
            .take(limit)
            .cloned()
            .collect();

        debug!(count = customers.len(), "Mobile search returned customers");
        Ok(customers)
    }

    /// Prefix search plus a single best candidate, for the lookup box that
    /// fills the memo form when one customer stands out.
    ///
    /// ## Errors
    /// `StoreError::Validation` for a malformed prefix, as in
    /// [`CustomerRepository::search_by_mobile_prefix`].
    pub async fn lookup_by_mobile(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> StoreResult<MobileLookup> {
        let query = validate_mobile_prefix(query)?;
        let limit = self.config.search_limit(limit);

        let range = PrefixRange::new(&query);
        let tables = self.tables.read().await;
        let all: Vec<&Customer> = tables
            .customers_by_mobile
            .range::<str, _>(range.bounds())
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| tables.customers.get(id))
            .collect();

        let best = best_match(&all, &query, |c| c.mobile.as_str()).map(|c| (*c).clone());
        let matches = all.into_iter().take(limit).cloned().collect();

        debug!(
            query = %query,
            best = ?best.as_ref().map(|c| c.id.as_str()),
            "Mobile lookup"
        );
        Ok(MobileLookup { matches, best })
    }

    /// Updates a customer's name and address.
    ///
    /// The mobile number is the lookup key and stays as registered. Memos
    /// already written keep their own snapshot of the old details.
    ///
    /// ## Errors
    /// `StoreError::NotFound` when no customer has this id.
    pub async fn update(&self, id: &str, name: &str, address: &str) -> StoreResult<Customer> {
        let name = validate_customer_name(name)?;
        let address = validate_address(address)?;

        let mut tables = self.tables.write().await;
        let customer = tables
            .customers
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Customer", id))?;

        customer.name = name;
        customer.address = address;

        debug!(id = %id, "Customer updated");
        Ok(customer.clone())
    }
}

fn new_customer(details: &CustomerDetails) -> StoreResult<Customer> {
    Ok(Customer {
        id: Uuid::new_v4().to_string(),
        mobile: validate_mobile(&details.mobile)?,
        name: validate_customer_name(&details.name)?,
        address: validate_address(&details.address)?,
        created_at: Utc::now(),
    })
}

fn first_with_mobile<'a>(tables: &'a Tables, mobile: &str) -> Option<&'a Customer> {
    tables
        .customers_by_mobile
        .get(mobile)
        .and_then(|ids| ids.first())
        .and_then(|id| tables.customers.get(id))
}

fn register(tables: &mut Tables, customer: Customer) {
    tables
        .customers_by_mobile
        .entry(customer.mobile.clone())
        .or_default()
        .push(customer.id.clone());
    tables.customers.insert(customer.id.clone(), customer);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{MemoryStore, StoreConfig};
    use memobook_core::CustomerDetails;

    fn details(mobile: &str, name: &str) -> CustomerDetails {
        CustomerDetails {
            mobile: mobile.to_string(),
            name: name.to_string(),
            address: "Islampur, Dhaka".to_string(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new(StoreConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = store().customers();
        let created = repo.create(details(" 01711223344 ", " Rahim ")).await.unwrap();

        assert_eq!(created.mobile, "01711223344");
        assert_eq!(created.name, "Rahim");

        let by_id = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_mobile = repo.get_by_mobile("01711223344").await.unwrap().unwrap();
        assert_eq!(by_mobile.id, created.id);

        assert!(repo.get_by_mobile("01711223345").await.unwrap().is_none());
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_validates() {
        let repo = store().customers();
        assert!(repo.create(details("12", "Rahim")).await.is_err());
        assert!(repo.create(details("01711223344", "")).await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_mobile_keeps_first_for_exact_lookup() {
        let repo = store().customers();
        let first = repo.create(details("01711223344", "Rahim")).await.unwrap();
        let second = repo.create(details("01711223344", "Karim")).await.unwrap();

        let found = repo.get_by_mobile("01711223344").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);

        let all = repo.search_by_mobile_prefix("01711223344", None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    }

    #[tokio::test]
    async fn test_prefix_search() {
        let repo = store().customers();
        for (mobile, name) in [
            ("01811000000", "Sumon"),
            ("01711998877", "Karim"),
            ("01611000000", "Jamal"),
            ("01711223344", "Rahim"),
        ] {
            repo.create(details(mobile, name)).await.unwrap();
        }

        let hits = repo.search_by_mobile_prefix("0171", None).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rahim", "Karim"]);

        let limited = repo.search_by_mobile_prefix("01", Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].name, "Jamal");

        let everyone = repo.search_by_mobile_prefix("", None).await.unwrap();
        assert_eq!(everyone.len(), 4);

        assert!(repo.search_by_mobile_prefix("01x", None).await.is_err());
        assert!(repo.search_by_mobile_prefix("019", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_by_mobile_prefers_exact() {
        let repo = store().customers();
        repo.create(details("017112233445", "Longer")).await.unwrap();
        let exact = repo.create(details("01711223344", "Rahim")).await.unwrap();
        repo.create(details("01711223399", "Karim")).await.unwrap();

        let found = repo.lookup_by_mobile("01711223344", None).await.unwrap();
        assert_eq!(found.best.unwrap().id, exact.id);
        assert_eq!(found.matches.len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_by_mobile_shortest_prefix() {
        let repo = store().customers();
        repo.create(details("017110000000", "Longer")).await.unwrap();
        let short = repo.create(details("01712000000", "Short")).await.unwrap();
        repo.create(details("01811000000", "Other")).await.unwrap();

        // the longer number sorts first, so the best pick is outside a limit of 1
        let found = repo.lookup_by_mobile("0171", Some(1)).await.unwrap();
        assert_eq!(found.matches.len(), 1);
        assert_eq!(found.matches[0].name, "Longer");
        assert_eq!(found.best.unwrap().id, short.id);

        let none = repo.lookup_by_mobile("019", None).await.unwrap();
        assert!(none.matches.is_empty());
        assert!(none.best.is_none());

        assert!(repo.lookup_by_mobile("01x", None).await.is_err());
    }

    #[tokio::test]
    async fn test_get_or_create() {
        let repo = store().customers();
        let (first, created) = repo.get_or_create(details("01711223344", "Rahim")).await.unwrap();
        assert!(created);

        let (again, created) = repo
            .get_or_create(details(" 01711223344 ", "Someone Else"))
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(again, first);
    }

    #[tokio::test]
    async fn test_concurrent_get_or_create_registers_once() {
        let repo = store().customers();

        let mut handles = Vec::new();
        for n in 0..32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.get_or_create(details("01711223344", &format!("Clerk {}", n)))
                    .await
                    .unwrap()
            }));
        }

        let mut created = 0;
        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            let (customer, was_created) = handle.await.unwrap();
            created += usize::from(was_created);
            ids.insert(customer.id);
        }

        assert_eq!(created, 1);
        assert_eq!(ids.len(), 1);
        let all = repo.search_by_mobile_prefix("01711223344", None).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = store().customers();
        let created = repo.create(details("01711223344", "Rahim")).await.unwrap();

        let updated = repo
            .update(&created.id, "Rahim Uddin", "Mirpur 10, Dhaka")
            .await
            .unwrap();
        assert_eq!(updated.name, "Rahim Uddin");
        assert_eq!(updated.mobile, "01711223344");

        assert!(repo.update("missing", "A", "B").await.is_err());
        assert!(repo.update(&created.id, "", "B").await.is_err());
    }
}
