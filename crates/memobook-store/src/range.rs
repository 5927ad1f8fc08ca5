//! # Date Ranges
//!
//! An inclusive span of shop-local calendar days, and its translation into
//! the UTC instants memos are stored under.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DateRange { start: 2024-01-05, end: 2024-01-06 }   offset +06:00       │
//! │                                                                         │
//! │  local   [2024-01-05 00:00 ─────────────────── 2024-01-07 00:00)        │
//! │  utc     [2024-01-04 18:00 ─────────────────── 2024-01-06 18:00)        │
//! │                                                                         │
//! │  Both named days are included in full; nothing from the day before      │
//! │  or the day after leaks in.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use memobook_core::report;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// ## Errors
    /// `StoreError::InvalidRange` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> StoreResult<Self> {
        if start > end {
            return Err(StoreError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn as_pair(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Number of days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// `Jan 5, 2024 - Jan 6, 2024`
    pub fn label(&self) -> String {
        report::date_range_label(Some(self.as_pair()))
    }

    /// UTC bounds of the range for a shop at `offset`: `[start 00:00, end+1 00:00)`.
    ///
    /// The exclusive end is `None` only when `end` is the last date chrono
    /// can represent.
    pub fn utc_bounds(&self, offset: &FixedOffset) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        let start = local_midnight(self.start, offset);
        let end = self.end.succ_opt().map(|next| local_midnight(next, offset));
        (start, end)
    }

    /// True when `instant` falls on one of the range's days at `offset`.
    pub fn contains(&self, instant: DateTime<Utc>, offset: &FixedOffset) -> bool {
        let day = instant.with_timezone(offset).date_naive();
        self.start <= day && day <= self.end
    }
}

/// The UTC instant at which `day` begins on a wall clock at `offset`.
fn local_midnight(day: NaiveDate, offset: &FixedOffset) -> DateTime<Utc> {
    let local = day.and_time(NaiveTime::MIN);
    let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
    // saturates at the ends of chrono's calendar
    Utc.from_utc_datetime(&local.checked_sub_signed(shift).unwrap_or(local))
}
