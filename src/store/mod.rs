//! The in-memory ledger every view reads from.
//!
//! One [`LedgerStore`] is created per process and handed by reference to
//! whatever consumes it. It owns the earnings and expenses outright; readers
//! always receive copies.

mod clock;
mod observers;
mod seed;

pub use clock::*;
pub use observers::*;

use chrono::{DateTime, Utc};

use crate::application::{EarningFilter, ExpenseFilter};
use crate::domain::analytics;
use crate::domain::{
    CategorySlice, Cents, DayHours, DayTotals, Earning, Expense, Target, TargetPeriod,
    TargetProgress,
};

pub struct LedgerStore {
    earnings: Vec<Earning>,
    expenses: Vec<Expense>,
    observers: Observers,
    clock: Box<dyn Clock>,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore {
    /// An empty ledger on the system clock.
    pub fn new() -> Self {
        Self {
            earnings: Vec::new(),
            expenses: Vec::new(),
            observers: Observers::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// A ledger preloaded with a handful of example entries.
    pub fn seeded() -> Self {
        Self::seeded_with_clock(SystemClock)
    }

    /// Example entries with the timestamped ones stamped from `clock`, so they
    /// land on that clock's today.
    pub fn seeded_with_clock(clock: impl Clock + 'static) -> Self {
        let mut store = Self::new().with_clock(clock);
        store.earnings = seed::earnings();
        store.expenses = seed::expenses(store.now());
        store
    }

    /// Replace the time source used by the date-relative analytics.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ========================
    // Earnings
    // ========================

    /// Most recent first.
    pub fn list_earnings(&self) -> Vec<Earning> {
        self.earnings.clone()
    }

    /// Prepend an earning. The caller guarantees `earning.id` is unique.
    pub fn add_earning(&mut self, earning: Earning) {
        tracing::debug!(id = %earning.id, platform = %earning.platform, amount = earning.amount, "earning added");
        self.earnings.insert(0, earning);
        self.observers.notify();
    }

    /// Swap in `earning` wherever its id already sits. Unknown ids change nothing.
    pub fn update_earning(&mut self, earning: Earning) {
        let mut replaced = 0;
        for slot in self.earnings.iter_mut().filter(|e| e.id == earning.id) {
            *slot = earning.clone();
            replaced += 1;
        }
        if replaced == 0 {
            tracing::debug!(id = %earning.id, "earning update ignored, id not found");
        } else {
            tracing::debug!(id = %earning.id, replaced, "earning updated");
        }
        self.observers.notify();
    }

    pub fn delete_earning(&mut self, id: &str) {
        let before = self.earnings.len();
        self.earnings.retain(|e| e.id != id);
        tracing::debug!(id, removed = before - self.earnings.len(), "earning deleted");
        self.observers.notify();
    }

    // ========================
    // Expenses
    // ========================

    /// Most recent first.
    pub fn list_expenses(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// Prepend an expense. The caller guarantees `expense.id` is unique.
    pub fn add_expense(&mut self, expense: Expense) {
        tracing::debug!(id = %expense.id, category = %expense.category, amount = expense.amount, "expense added");
        self.expenses.insert(0, expense);
        self.observers.notify();
    }

    /// Swap in `expense` wherever its id already sits. Unknown ids change nothing.
    pub fn update_expense(&mut self, expense: Expense) {
        let mut replaced = 0;
        for slot in self.expenses.iter_mut().filter(|e| e.id == expense.id) {
            *slot = expense.clone();
            replaced += 1;
        }
        if replaced == 0 {
            tracing::debug!(id = %expense.id, "expense update ignored, id not found");
        } else {
            tracing::debug!(id = %expense.id, replaced, "expense updated");
        }
        self.observers.notify();
    }

    pub fn delete_expense(&mut self, id: &str) {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        tracing::debug!(id, removed = before - self.expenses.len(), "expense deleted");
        self.observers.notify();
    }

    // ========================
    // Change notification
    // ========================

    /// Register a callback run after every mutation.
    ///
    /// The callback must only read state it captured itself (typically by
    /// flagging a re-render); it must not mutate this store.
    pub fn subscribe(&self, observer: impl FnMut() + 'static) -> Subscription {
        self.observers.subscribe(observer)
    }

    // ========================
    // Analytics
    // ========================

    pub fn today_earnings_total(&self) -> Cents {
        analytics::today_earnings_total(self.now(), &self.earnings)
    }

    pub fn today_expenses_total(&self) -> Cents {
        analytics::today_expenses_total(self.now(), &self.expenses)
    }

    pub fn weekly_earnings_total(&self) -> Cents {
        analytics::weekly_earnings_total(self.now(), &self.earnings)
    }

    pub fn weekly_expenses_total(&self) -> Cents {
        analytics::weekly_expenses_total(self.now(), &self.expenses)
    }

    /// Cents earned per hour over the last week, or 0 with no hours logged.
    pub fn weekly_hourly_rate(&self) -> Cents {
        analytics::weekly_hourly_rate(self.now(), &self.earnings)
    }

    pub fn total_trips_this_week(&self) -> u32 {
        analytics::total_trips_this_week(self.now(), &self.earnings)
    }

    pub fn total_hours_this_week(&self) -> f64 {
        analytics::total_hours_this_week(self.now(), &self.earnings)
    }

    pub fn weekly_series(&self) -> Vec<DayTotals> {
        analytics::weekly_series(self.now(), &self.earnings, &self.expenses)
    }

    pub fn daily_hours_series(&self) -> Vec<DayHours> {
        analytics::daily_hours_series(self.now(), &self.earnings)
    }

    pub fn expense_breakdown(&self) -> Vec<CategorySlice> {
        analytics::expense_breakdown(self.now(), &self.expenses)
    }

    pub fn month_to_date_earnings_total(&self) -> Cents {
        analytics::month_to_date_earnings_total(self.now(), &self.earnings)
    }

    /// Distinct platforms in list order.
    pub fn platforms(&self) -> Vec<String> {
        distinct(self.earnings.iter().map(|e| e.platform.as_str()))
    }

    /// Distinct expense categories in list order.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.expenses.iter().map(|e| e.category.as_str()))
    }

    pub fn filter_earnings(&self, filter: &EarningFilter) -> Vec<Earning> {
        self.earnings
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    pub fn filter_expenses(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Progress of `target` against the earnings of its period.
    pub fn target_progress(&self, target: &Target) -> TargetProgress {
        let current = match target.period {
            TargetPeriod::Daily => self.today_earnings_total(),
            TargetPeriod::Weekly => self.weekly_earnings_total(),
            TargetPeriod::Monthly => self.month_to_date_earnings_total(),
        };
        TargetProgress::new(target.clone(), current, self.now())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
