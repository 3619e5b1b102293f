use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Cents, Earning, Expense};

/// Weekday labels with the week starting on Monday.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Colors handed out round-robin to expense categories.
pub const BREAKDOWN_PALETTE: [&str; 4] = ["#1E3C72", "#00B4DB", "#43CEA2", "#EF473A"];

/// Length of the rolling window used by every weekly figure.
pub const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    pub day: String,
    pub earnings: Cents,
    pub expenses: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub day: String,
    pub hours: f64,
    pub earnings: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: Cents,
    pub color: String,
}

/// Short label for the weekday of `date`.
/// Sunday-based index 0..6 is rotated so Monday lands on slot 0.
pub fn day_label(date: NaiveDate) -> &'static str {
    let native = date.weekday().num_days_from_sunday() as usize;
    DAY_LABELS[(native + 6) % 7]
}

// Earnings carry a date only, so their window is computed on calendar days.
fn earnings_window_start(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive() - Duration::days(WEEK_DAYS)
}

// Expenses carry a timestamp, so their window is computed on instants.
fn expenses_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(WEEK_DAYS)
}

pub fn earnings_on(date: NaiveDate, earnings: &[Earning]) -> impl Iterator<Item = &Earning> {
    earnings.iter().filter(move |e| e.date == date)
}

pub fn weekly_earnings(now: DateTime<Utc>, earnings: &[Earning]) -> impl Iterator<Item = &Earning> {
    let start = earnings_window_start(now);
    earnings.iter().filter(move |e| e.date >= start)
}

pub fn weekly_expenses(now: DateTime<Utc>, expenses: &[Expense]) -> impl Iterator<Item = &Expense> {
    let start = expenses_window_start(now);
    expenses.iter().filter(move |e| e.date >= start)
}

pub fn today_earnings_total(now: DateTime<Utc>, earnings: &[Earning]) -> Cents {
    earnings_on(now.date_naive(), earnings).map(|e| e.amount).sum()
}

pub fn today_expenses_total(now: DateTime<Utc>, expenses: &[Expense]) -> Cents {
    expenses_on(now.date_naive(), expenses)
}

pub fn weekly_earnings_total(now: DateTime<Utc>, earnings: &[Earning]) -> Cents {
    weekly_earnings(now, earnings).map(|e| e.amount).sum()
}

pub fn weekly_expenses_total(now: DateTime<Utc>, expenses: &[Expense]) -> Cents {
    weekly_expenses(now, expenses).map(|e| e.amount).sum()
}

pub fn total_trips_this_week(now: DateTime<Utc>, earnings: &[Earning]) -> u32 {
    weekly_earnings(now, earnings).map(|e| e.trips).sum()
}

pub fn total_hours_this_week(now: DateTime<Utc>, earnings: &[Earning]) -> f64 {
    weekly_earnings(now, earnings).map(|e| e.hours).sum()
}

/// Weekly earnings per hour worked, in cents. Zero when no hours were logged.
pub fn weekly_hourly_rate(now: DateTime<Utc>, earnings: &[Earning]) -> Cents {
    let hours = total_hours_this_week(now, earnings);
    if hours <= 0.0 {
        return 0;
    }
    (weekly_earnings_total(now, earnings) as f64 / hours).round() as Cents
}

/// Earnings dated on or after the first day of the current month.
pub fn month_to_date_earnings_total(now: DateTime<Utc>, earnings: &[Earning]) -> Cents {
    let today = now.date_naive();
    let month_start = today - Duration::days(i64::from(today.day0()));
    earnings
        .iter()
        .filter(|e| e.date >= month_start)
        .map(|e| e.amount)
        .sum()
}

// Expenses are bucketed by the UTC calendar day of their timestamp.
fn expenses_on(date: NaiveDate, expenses: &[Expense]) -> Cents {
    expenses
        .iter()
        .filter(|e| e.date.date_naive() == date)
        .map(|e| e.amount)
        .sum()
}

/// The seven calendar days ending today, oldest first.
fn last_seven_days(now: DateTime<Utc>) -> impl Iterator<Item = NaiveDate> {
    let today = now.date_naive();
    (0..WEEK_DAYS).rev().map(move |offset| today - Duration::days(offset))
}

pub fn weekly_series(now: DateTime<Utc>, earnings: &[Earning], expenses: &[Expense]) -> Vec<DayTotals> {
    last_seven_days(now)
        .map(|date| DayTotals {
            day: day_label(date).to_string(),
            earnings: earnings_on(date, earnings).map(|e| e.amount).sum(),
            expenses: expenses_on(date, expenses),
        })
        .collect()
}

pub fn daily_hours_series(now: DateTime<Utc>, earnings: &[Earning]) -> Vec<DayHours> {
    last_seven_days(now)
        .map(|date| DayHours {
            day: day_label(date).to_string(),
            hours: earnings_on(date, earnings).map(|e| e.hours).sum(),
            earnings: earnings_on(date, earnings).map(|e| e.amount).sum(),
        })
        .collect()
}

/// Weekly expenses summed per category, in order of first appearance.
pub fn expense_breakdown(now: DateTime<Utc>, expenses: &[Expense]) -> Vec<CategorySlice> {
    let mut totals: Vec<(String, Cents)> = Vec::new();

    for expense in weekly_expenses(now, expenses) {
        match totals.iter_mut().find(|(name, _)| *name == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.category.clone(), expense.amount)),
        }
    }

    totals
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| CategorySlice {
            name,
            value,
            color: BREAKDOWN_PALETTE[index % BREAKDOWN_PALETTE.len()].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_label_starts_week_on_monday() {
        // 2024-01-15 was a Monday, 2024-01-21 a Sunday
        assert_eq!(day_label(date(2024, 1, 15)), "Mon");
        assert_eq!(day_label(date(2024, 1, 20)), "Sat");
        assert_eq!(day_label(date(2024, 1, 21)), "Sun");
    }

    #[test]
    fn test_hourly_rate_without_hours_is_zero() {
        let now = noon(2024, 1, 15);
        let earnings = vec![Earning::new("1", 5000, "Uber", 2, 0.0, now.date_naive())];

        assert_eq!(weekly_hourly_rate(now, &earnings), 0);
        assert_eq!(weekly_hourly_rate(now, &[]), 0);
    }

    #[test]
    fn test_hourly_rate_rounds_to_cents() {
        let now = noon(2024, 1, 15);
        let earnings = vec![Earning::new("1", 10000, "Uber", 5, 3.0, now.date_naive())];

        // 100.00 over 3 hours
        assert_eq!(weekly_hourly_rate(now, &earnings), 3333);
    }

    #[test]
    fn test_expense_day_bucket_uses_timestamp_date() {
        let now = noon(2024, 1, 15);
        let late = Utc.with_ymd_and_hms(2024, 1, 14, 23, 59, 59).unwrap();
        let expenses = vec![Expense::manual("1", 700, "Tolls", "Bridge", late)];

        let series = weekly_series(now, &[], &expenses);
        assert_eq!(series[5].day, "Sun");
        assert_eq!(series[5].expenses, 700);
        assert_eq!(series[6].expenses, 0);
    }

    #[test]
    fn test_month_to_date_excludes_previous_month() {
        let now = noon(2024, 2, 3);
        let earnings = vec![
            Earning::new("1", 1000, "Uber", 1, 1.0, date(2024, 2, 1)),
            Earning::new("2", 2000, "Bolt", 1, 1.0, date(2024, 1, 31)),
        ];

        assert_eq!(month_to_date_earnings_total(now, &earnings), 1000);
    }
}
