use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{Earning, Expense};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Example sessions so a fresh dashboard has something to show.
pub fn earnings() -> Vec<Earning> {
    vec![
        Earning::new("1", 14550, "Uber", 8, 6.5, day(2024, 1, 15)),
        Earning::new("2", 12375, "Bolt", 6, 5.0, day(2024, 1, 15)),
        Earning::new("3", 16725, "Uber", 10, 7.5, day(2024, 1, 14)),
        Earning::new("4", 8900, "Bolt", 5, 4.0, day(2024, 1, 14)),
        Earning::new("5", 20000, "Lyft", 12, 8.0, day(2024, 1, 13)),
    ]
}

/// Example costs, stamped relative to `now` so they land in today's figures.
pub fn expenses(now: DateTime<Utc>) -> Vec<Expense> {
    vec![
        Expense::manual("1", 4520, "Fuel", "Gas station fill-up", now),
        Expense::mileage("2", 45.0, 0.545, "Business miles", now - Duration::hours(2)),
    ]
}
