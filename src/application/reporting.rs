use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CategorySlice, Cents, DayHours, DayTotals, Target, TargetProgress};
use crate::store::LedgerStore;

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub as_of: DateTime<Utc>,
    pub today_earnings: Cents,
    pub today_expenses: Cents,
    pub today_net: Cents,
    pub weekly_earnings: Cents,
    pub weekly_expenses: Cents,
    pub weekly_net: Cents,
    pub hourly_rate: Cents,
    pub trips: u32,
    pub hours: f64,
}

impl DashboardSummary {
    pub fn build(store: &LedgerStore) -> Self {
        let today_earnings = store.today_earnings_total();
        let today_expenses = store.today_expenses_total();
        let weekly_earnings = store.weekly_earnings_total();
        let weekly_expenses = store.weekly_expenses_total();

        Self {
            as_of: store.now(),
            today_earnings,
            today_expenses,
            today_net: today_earnings - today_expenses,
            weekly_earnings,
            weekly_expenses,
            weekly_net: weekly_earnings - weekly_expenses,
            hourly_rate: store.weekly_hourly_rate(),
            trips: store.total_trips_this_week(),
            hours: store.total_hours_this_week(),
        }
    }
}

/// Everything the weekly analytics screen shows at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub summary: DashboardSummary,
    pub days: Vec<DayTotals>,
    pub hours: Vec<DayHours>,
    pub breakdown: Vec<CategorySlice>,
}

impl WeeklyReport {
    pub fn build(store: &LedgerStore) -> Self {
        Self {
            summary: DashboardSummary::build(store),
            days: store.weekly_series(),
            hours: store.daily_hours_series(),
            breakdown: store.expense_breakdown(),
        }
    }
}

/// Progress for each enabled target.
pub fn target_report(store: &LedgerStore, targets: &[Target]) -> Vec<TargetProgress> {
    targets
        .iter()
        .filter(|t| t.enabled)
        .map(|t| store.target_progress(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone};

    use super::*;
    use crate::domain::{Earning, Expense, TargetPeriod};
    use crate::store::FixedClock;

    #[test]
    fn test_dashboard_summary_nets() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let today = now.date_naive();
        let mut store = LedgerStore::new().with_clock(FixedClock(now));
        store.add_earning(Earning::new("1", 10000, "Uber", 4, 4.0, today));
        store.add_earning(Earning::new("2", 6000, "Bolt", 3, 2.0, today - Duration::days(2)));
        store.add_expense(Expense::manual("1", 2500, "Fuel", "Fill-up", now));

        let summary = DashboardSummary::build(&store);

        assert_eq!(summary.today_net, 7500);
        assert_eq!(summary.weekly_net, 13500);
        assert_eq!(summary.hourly_rate, 2667);
        assert_eq!(summary.trips, 7);
        assert_eq!(summary.hours, 6.0);
    }

    #[test]
    fn test_target_report_skips_disabled() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let mut store = LedgerStore::new().with_clock(FixedClock(now));
        store.add_earning(Earning::new(
            "1",
            15000,
            "Uber",
            6,
            5.0,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        ));

        let report = target_report(&store, &Target::defaults(now));

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].target.period, TargetPeriod::Daily);
        assert_eq!(report[0].current, 15000);
        assert_eq!(report[0].percentage, 75.0);
        assert_eq!(report[0].remaining(), 5000);
    }
}
