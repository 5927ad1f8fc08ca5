//! # Report Service
//!
//! Lookup → aggregation → assembly, for each report the shop prints.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  sales_summary(range)                                                   │
//! │    memos.list_by_date_range ──► summarize_by_date_range ──► assembler   │
//! │                                                                         │
//! │  customer_statement(mobile, range?)                                     │
//! │    customers.get_by_mobile ──► memos.list_by_customer                   │
//! │                           ──► summarize_for_customer ──► assembler      │
//! │                                                                         │
//! │  memo_receipt(id)                                                       │
//! │    memos.get_by_id ──► assembler.memo_receipt                           │
//! │                                                                         │
//! │  All grouping uses the shop's configured UTC offset.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use memobook_core::report::{
    customer_summary_file_stem, sales_summary_file_stem, sales_summary_title,
};
use memobook_core::{
    summarize_by_date_range, summarize_for_customer, CustomerStatement, MemoReceipt,
    ReportAssembler, SalesReport, SalesSummary,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::range::DateRange;
use crate::store::MemoryStore;

/// A date-range sales summary with its printable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub summary: SalesSummary,
    pub report: SalesReport,
    /// Suggested download name, without extension.
    pub file_stem: String,
}

/// A customer statement with its printable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementReport {
    pub statement: CustomerStatement,
    pub report: SalesReport,
    pub file_stem: String,
}

/// Builds reports from stored memos.
#[derive(Debug, Clone)]
pub struct ReportService {
    store: MemoryStore,
    assembler: ReportAssembler,
}

impl ReportService {
    pub fn new(store: MemoryStore) -> Self {
        let assembler = ReportAssembler::new(store.config().report_settings());
        ReportService { store, assembler }
    }

    /// Sales summary for every memo dated within `range`.
    pub async fn sales_summary(&self, range: DateRange) -> StoreResult<SummaryReport> {
        let memos = self.store.memos().list_by_date_range(range).await?;
        let offset = self.store.config().utc_offset();

        let summary = summarize_by_date_range(&memos, &offset);
        let title = sales_summary_title(range.start(), range.end());
        let report = self.assembler.sales_summary(&summary, title, Utc::now());

        info!(
            start = %range.start(),
            end = %range.end(),
            memos = memos.len(),
            days = summary.daily_sales.len(),
            total = %summary.total_amount,
            "Sales summary generated"
        );

        Ok(SummaryReport {
            summary,
            report,
            file_stem: sales_summary_file_stem(range.start(), range.end()),
        })
    }

    /// Statement for the customer registered under `mobile`.
    ///
    /// ## Errors
    /// `StoreError::CustomerNotFound` when no customer has this mobile.
    pub async fn customer_statement(
        &self,
        mobile: &str,
        range: Option<DateRange>,
    ) -> StoreResult<StatementReport> {
        let customer = self
            .store
            .customers()
            .get_by_mobile(mobile)
            .await?
            .ok_or_else(|| StoreError::CustomerNotFound {
                mobile: mobile.trim().to_string(),
            })?;

        let memos = self
            .store
            .memos()
            .list_by_customer(&customer.id, range)
            .await?;
        debug!(customer_id = %customer.id, memos = memos.len(), "Building customer statement");

        let offset = self.store.config().utc_offset();
        let statement = summarize_for_customer(
            &memos,
            &customer,
            range.map(|r| r.as_pair()),
            &offset,
        );

        let now = Utc::now();
        let report = self.assembler.customer_statement(&statement, now);

        info!(
            customer_id = %customer.id,
            memos = memos.len(),
            total = %statement.total_amount,
            "Customer statement generated"
        );

        Ok(StatementReport {
            file_stem: customer_summary_file_stem(&customer.name, now),
            statement,
            report,
        })
    }

    /// Printable layout of a stored memo.
    ///
    /// ## Errors
    /// `StoreError::NotFound` when no memo has this id.
    pub async fn memo_receipt(&self, memo_id: &str) -> StoreResult<MemoReceipt> {
        let memo = self
            .store
            .memos()
            .get_by_id(memo_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Memo", memo_id))?;

        Ok(self.assembler.memo_receipt(&memo))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::{DateRange, MemoryStore, StoreConfig};
    use chrono::{NaiveDate, TimeZone, Utc};
    use memobook_core::{MemoDraft, Money, Quantity, Unit};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two memos on Jan 5 (Silk×3 @40, Cotton×2 @0) and one on Jan 6
    /// (Silk×1 @50), all at 10:00 Dhaka time.
    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new(StoreConfig::default()).unwrap();
        let service = store.memo_service();
        let at = |d: u32| Utc.with_ymd_and_hms(2024, 1, d, 4, 0, 0).unwrap();

        for draft in [
            MemoDraft::new("01711223344", "Rahim", "Islampur", at(5))
                .with_line("Silk", Quantity::whole(3), Unit::Yards, Money::from_taka(40)),
            MemoDraft::new("01811223344", "Karim", "Mirpur", at(5))
                .with_line("Cotton", Quantity::whole(2), Unit::Yards, Money::zero()),
            MemoDraft::new("01711223344", "Rahim", "Islampur", at(6))
                .with_line("Silk", Quantity::whole(1), Unit::Yards, Money::from_taka(50)),
        ] {
            service.save_memo(draft).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_sales_summary() {
        let store = seeded().await;
        let range = DateRange::new(day(2024, 1, 5), day(2024, 1, 6)).unwrap();

        let out = store.reports().sales_summary(range).await.unwrap();

        assert_eq!(out.summary.total_amount, Money::from_taka(170));
        assert_eq!(out.summary.total_memos(), 3);
        // memos arrive newest first, so Jan 6 is seen first
        let days: Vec<NaiveDate> = out.summary.daily_sales.iter().map(|d| d.date).collect();
        assert_eq!(days, vec![day(2024, 1, 6), day(2024, 1, 5)]);
        assert_eq!(out.summary.items_summary.get("Silk").unwrap().quantity, Quantity::whole(4));

        assert_eq!(out.report.title, "Sales Summary (Jan 5, 2024 - Jan 6, 2024)");
        assert_eq!(out.file_stem, "sales-summary-2024-01-05-2024-01-06");
    }

    #[tokio::test]
    async fn test_summary_report_json_shape() {
        let store = seeded().await;
        let range = DateRange::new(day(2024, 1, 5), day(2024, 1, 6)).unwrap();
        let out = store.reports().sales_summary(range).await.unwrap();

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["file_stem"], "sales-summary-2024-01-05-2024-01-06");
        assert_eq!(json["report"]["title"], "Sales Summary (Jan 5, 2024 - Jan 6, 2024)");
        assert_eq!(json["report"]["total_memos"], 3);
        assert_eq!(json["summary"]["daily_sales"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sales_summary_empty_range() {
        let store = seeded().await;
        let range = DateRange::single_day(day(2024, 2, 1));
        let out = store.reports().sales_summary(range).await.unwrap();
        assert!(out.summary.is_empty());
        assert!(out.summary.total_amount.is_zero());
        assert!(out.report.items.is_empty());
    }

    #[tokio::test]
    async fn test_customer_statement() {
        let store = seeded().await;

        let all = store
            .reports()
            .customer_statement("01711223344", None)
            .await
            .unwrap();
        assert_eq!(all.statement.title, "Customer Summary - Rahim (All Time)");
        assert_eq!(all.statement.entries.len(), 2);
        assert!(all.statement.entries.iter().all(|e| e.total_memos == 1));
        assert_eq!(all.statement.total_amount, Money::from_taka(170));
        assert!(all.file_stem.starts_with("customer-summary-Rahim-"));

        let jan5 = DateRange::single_day(day(2024, 1, 5));
        let one = store
            .reports()
            .customer_statement("01711223344", Some(jan5))
            .await
            .unwrap();
        assert_eq!(one.statement.entries.len(), 1);
        assert_eq!(one.statement.total_amount, Money::from_taka(120));
        assert_eq!(
            one.statement.title,
            "Customer Summary - Rahim (Jan 5, 2024 - Jan 5, 2024)"
        );
    }

    #[tokio::test]
    async fn test_customer_statement_unknown_mobile() {
        let store = seeded().await;
        let result = store.reports().customer_statement("01999999999", None).await;
        assert!(matches!(result, Err(StoreError::CustomerNotFound { .. })));
    }

    #[tokio::test]
    async fn test_memo_receipt() {
        let store = seeded().await;
        let saved = store
            .memo_service()
            .customer_history("01811223344")
            .await
            .unwrap()
            .unwrap();

        let receipt = store.reports().memo_receipt(&saved.memos[0].id).await.unwrap();
        assert_eq!(receipt.shop_name, "RAJ TRADERS");
        assert_eq!(receipt.customer.name, "Karim");
        assert_eq!(receipt.rows[0].item_name, "Cotton");

        assert!(matches!(
            store.reports().memo_receipt("missing").await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
