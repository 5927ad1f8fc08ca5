//! # Services
//!
//! Workflows that span several repositories and the core engine.
//!
//! - [`MemoService`](memo::MemoService) - Save a memo from the memo form
//! - [`ReportService`](report::ReportService) - Sales summaries, customer
//!   statements and memo receipts

pub mod memo;
pub mod report;
