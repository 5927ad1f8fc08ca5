//! # Repository Module
//!
//! Record access for Memobook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Memo form / report screen                                             │
//! │       │                                                                 │
//! │       │  store.customers().search_by_mobile_prefix("0171", None)       │
//! │       ▼                                                                 │
//! │  CustomerRepository         MemoRepository          ItemCatalogRepo    │
//! │  ├── create                 ├── insert              ├── remember       │
//! │  ├── get_by_id              ├── get_by_id           └── search_by_     │
//! │  ├── get_by_mobile          ├── list_by_customer        prefix         │
//! │  ├── search_by_mobile_      └── list_by_date_range                     │
//! │  │   prefix                                                            │
//! │  └── update                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shared tables (store.rs)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customers and mobile search
//! - [`MemoRepository`](memo::MemoRepository) - Memos by customer and date range
//! - [`ItemCatalogRepository`](item::ItemCatalogRepository) - Item name suggestions

pub mod customer;
pub mod item;
pub mod memo;
