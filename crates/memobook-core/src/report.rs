//! # Report Assembly
//!
//! Turns aggregation output into renderer-ready report data.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SalesSummary ──────┐                                                   │
//! │  CustomerStatement ─┼──► ReportAssembler ──► SalesReport ──┐            │
//! │  Memo ──────────────┘         │              MemoReceipt ──┤            │
//! │                               │                            ▼            │
//! │                      ReportSettings               impl ReportRenderer   │
//! │                      (shop, currency, tz)         (PDF lives outside;   │
//! │                                                    PlainTextRenderer    │
//! │                                                    ships here)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A report carries a title, generation metadata, an item breakdown and a
//! daily breakdown. How those become pages is up to the renderer.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::{Money, Quantity};
use crate::summary::{CustomerStatement, SalesSummary};
use crate::types::{CustomerSnapshot, DailySales, ItemsSummary, Memo, Unit};

/// Default shop name printed on memo receipts.
pub const DEFAULT_SHOP_NAME: &str = "RAJ TRADERS";

/// Default currency label placed before amounts.
pub const DEFAULT_CURRENCY_LABEL: &str = "BDT.";

// =============================================================================
// Titles and File Names
// =============================================================================

/// Formats a date the way report titles show it: `Jan 5, 2024`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Jan 1, 2024 - Jan 31, 2024`, or `All Time` without a range.
pub fn date_range_label(range: Option<(NaiveDate, NaiveDate)>) -> String {
    match range {
        Some((start, end)) => format!("{} - {}", display_date(start), display_date(end)),
        None => "All Time".to_string(),
    }
}

/// `Sales Summary (Jan 5, 2024 - Jan 6, 2024)`
pub fn sales_summary_title(start: NaiveDate, end: NaiveDate) -> String {
    format!("Sales Summary ({})", date_range_label(Some((start, end))))
}

/// Suggested file stem for a sales summary: `sales-summary-2024-01-05-2024-01-06`.
pub fn sales_summary_file_stem(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "sales-summary-{}-{}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

/// Suggested file stem for a customer statement:
/// `customer-summary-{name}-{unix millis}`.
pub fn customer_summary_file_stem(customer_name: &str, at: DateTime<Utc>) -> String {
    let name: String = customer_name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    format!("customer-summary-{}-{}", name, at.timestamp_millis())
}

// =============================================================================
// Report Data
// =============================================================================

/// Shop-level settings every report is stamped with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub shop_name: String,
    pub currency_label: String,
    /// Offset used for generation timestamps.
    pub utc_offset: FixedOffset,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
            utc_offset: Utc.fix(),
        }
    }
}

/// Row of the items-sold table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemRow {
    pub item_name: String,
    pub quantity: Quantity,
    pub unit: Unit,
}

/// Row of the daily breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyRow {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub total_memos: u32,
    pub amount: Money,
}

/// A sales summary or customer statement, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    pub title: String,
    #[ts(as = "String")]
    pub generated_at: DateTime<FixedOffset>,
    pub currency_label: String,
    pub total_amount: Money,
    pub total_memos: u32,
    pub unique_items: usize,
    pub items: Vec<ItemRow>,
    pub daily: Vec<DailyRow>,
}

impl SalesReport {
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Row of a memo receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptRow {
    pub item_name: String,
    pub quantity: Quantity,
    pub unit: Unit,
    pub rate: Money,
    pub amount: Money,
}

/// A single memo laid out for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemoReceipt {
    pub shop_name: String,
    pub memo_id: String,
    #[ts(as = "String")]
    pub date: DateTime<FixedOffset>,
    pub customer: CustomerSnapshot,
    pub currency_label: String,
    pub rows: Vec<ReceiptRow>,
    pub total_amount: Money,
}

// =============================================================================
// Assembler
// =============================================================================

/// Builds report data from engine output.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    settings: ReportSettings,
}

impl ReportAssembler {
    pub fn new(settings: ReportSettings) -> Self {
        ReportAssembler { settings }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Report for a date-range summary.
    pub fn sales_summary(
        &self,
        summary: &SalesSummary,
        title: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> SalesReport {
        self.build(
            title.into(),
            generated_at,
            &summary.items_summary,
            &summary.daily_sales,
            summary.total_amount,
        )
    }

    /// Report for a customer statement (one daily row per memo).
    pub fn customer_statement(
        &self,
        statement: &CustomerStatement,
        generated_at: DateTime<Utc>,
    ) -> SalesReport {
        self.build(
            statement.title.clone(),
            generated_at,
            &statement.items_summary,
            &statement.entries,
            statement.total_amount,
        )
    }

    /// Printable layout of one memo.
    pub fn memo_receipt(&self, memo: &Memo) -> MemoReceipt {
        MemoReceipt {
            shop_name: self.settings.shop_name.clone(),
            memo_id: memo.id.clone(),
            date: memo.date.with_timezone(&self.settings.utc_offset),
            customer: memo.customer.clone(),
            currency_label: self.settings.currency_label.clone(),
            rows: memo
                .items
                .iter()
                .map(|item| ReceiptRow {
                    item_name: item.item_name.clone(),
                    quantity: item.quantity,
                    unit: item.unit,
                    rate: item.rate,
                    amount: item.amount(),
                })
                .collect(),
            total_amount: memo.total_amount,
        }
    }

    fn build(
        &self,
        title: String,
        generated_at: DateTime<Utc>,
        items: &ItemsSummary,
        days: &[DailySales],
        total_amount: Money,
    ) -> SalesReport {
        SalesReport {
            title,
            generated_at: generated_at.with_timezone(&self.settings.utc_offset),
            currency_label: self.settings.currency_label.clone(),
            total_amount,
            total_memos: days.iter().map(|d| d.total_memos).sum(),
            unique_items: items.len(),
            items: items
                .iter()
                .map(|e| ItemRow {
                    item_name: e.item_name.clone(),
                    quantity: e.quantity,
                    unit: e.unit,
                })
                .collect(),
            daily: days
                .iter()
                .map(|d| DailyRow {
                    date: d.date,
                    total_memos: d.total_memos,
                    amount: d.total_amount,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Renderers
// =============================================================================

/// Turns report data into a document.
pub trait ReportRenderer {
    type Output;

    fn render_sales_report(&self, report: &SalesReport) -> Self::Output;

    fn render_memo_receipt(&self, receipt: &MemoReceipt) -> Self::Output;
}

/// Fixed-width text tables, for terminals and logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl ReportRenderer for PlainTextRenderer {
    type Output = String;

    fn render_sales_report(&self, report: &SalesReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", report.title);
        let _ = writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M %:z"));
        let _ = writeln!(
            out,
            "Total Sales: {}",
            report.total_amount.with_label(&report.currency_label)
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "Items Sold Summary:");
        for row in &report.items {
            let _ = writeln!(out, "  {}: {} {}", row.item_name, row.quantity, row.unit);
        }

        if !report.daily.is_empty() {
            let _ = writeln!(out);
            let rows: Vec<Vec<String>> = report
                .daily
                .iter()
                .map(|d| {
                    vec![
                        d.date.format("%Y-%m-%d").to_string(),
                        d.total_memos.to_string(),
                        d.amount.to_string(),
                    ]
                })
                .collect();
            out.push_str(&text_table(
                &["Date", "Total Memos", "Amount"],
                &rows,
                &[false, true, true],
                None,
            ));
        }

        out
    }

    fn render_memo_receipt(&self, receipt: &MemoReceipt) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", receipt.shop_name);
        let _ = writeln!(out, "Date: {}", receipt.date.format("%Y-%m-%d %H:%M"));
        let _ = writeln!(out, "Customer: {}", receipt.customer.name);
        let _ = writeln!(out, "Mobile: {}", receipt.customer.mobile);
        let _ = writeln!(out, "Address: {}", receipt.customer.address);
        let _ = writeln!(out);

        let rows: Vec<Vec<String>> = receipt
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.item_name.clone(),
                    r.quantity.to_string(),
                    r.unit.to_string(),
                    r.rate.to_string(),
                    r.amount.to_string(),
                ]
            })
            .collect();
        let footer = vec![
            String::new(),
            String::new(),
            String::new(),
            "Total:".to_string(),
            receipt.total_amount.with_label(&receipt.currency_label),
        ];
        out.push_str(&text_table(
            &["Item", "Quantity", "Unit", "Rate", "Amount"],
            &rows,
            &[false, true, false, true, true],
            Some(&footer),
        ));

        out
    }
}

/// Renders a bordered text table. `right` marks right-aligned columns.
fn text_table(
    headers: &[&str],
    rows: &[Vec<String>],
    right: &[bool],
    footer: Option<&Vec<String>>,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter().chain(footer) {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                if right.get(i).copied().unwrap_or(false) {
                    format!("{:>width$}", cell, width = w)
                } else {
                    format!("{:<width$}", cell, width = w)
                }
            })
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };
    let rule = format!(
        "{}\n",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = line(&header_cells);
    out.push_str(&rule);
    for row in rows {
        out.push_str(&line(row));
    }
    if let Some(footer) = footer {
        out.push_str(&rule);
        out.push_str(&line(footer));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
