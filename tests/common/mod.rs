// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use shiftledger::domain::{Cents, Earning, Expense};
use shiftledger::store::{FixedClock, LedgerStore};

/// Monday 2024-01-15, 14:30 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
}

/// Empty store pinned to `now`
pub fn store_at(now: DateTime<Utc>) -> LedgerStore {
    LedgerStore::new().with_clock(FixedClock(now))
}

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Calendar day `days` before the fixed test clock
pub fn days_ago(days: i64) -> NaiveDate {
    fixed_now().date_naive() - Duration::days(days)
}

pub fn earning(id: &str, amount: Cents, date: NaiveDate) -> Earning {
    Earning::new(id, amount, "Uber", 1, 1.0, date)
}

pub fn expense(id: &str, category: &str, amount: Cents, at: DateTime<Utc>) -> Expense {
    Expense::manual(id, amount, category, "test expense", at)
}
