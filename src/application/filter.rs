use chrono::NaiveDate;

use crate::domain::{Cents, Earning, Expense};
use crate::store::LedgerStore;

/// Filter for listing earnings. Dates are inclusive.
#[derive(Debug, Clone, Default)]
pub struct EarningFilter {
    pub platform: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

/// Filter for listing expenses, matched on the calendar day of the timestamp.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
}

impl EarningFilter {
    pub fn matches(&self, earning: &Earning) -> bool {
        self.platform.as_deref().is_none_or(|p| earning.platform == p)
            && in_range(earning.date, self.from_date, self.to_date)
    }

    pub fn apply(&self, store: &LedgerStore) -> Vec<Earning> {
        store.filter_earnings(self)
    }
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.as_deref().is_none_or(|c| expense.category == c)
            && in_range(expense.date.date_naive(), self.from_date, self.to_date)
    }

    pub fn apply(&self, store: &LedgerStore) -> Vec<Expense> {
        store.filter_expenses(self)
    }
}

pub fn total_earned(earnings: &[Earning]) -> Cents {
    earnings.iter().map(|e| e.amount).sum()
}

pub fn total_spent(expenses: &[Expense]) -> Cents {
    expenses.iter().map(|e| e.amount).sum()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_earning_filter() {
        let uber = Earning::new("1", 1000, "Uber", 1, 1.0, date(2024, 1, 10));
        let bolt = Earning::new("2", 2000, "Bolt", 1, 1.0, date(2024, 1, 20));

        let by_platform = EarningFilter {
            platform: Some("Uber".into()),
            ..Default::default()
        };
        assert!(by_platform.matches(&uber));
        assert!(!by_platform.matches(&bolt));

        let by_range = EarningFilter {
            from_date: Some(date(2024, 1, 10)),
            to_date: Some(date(2024, 1, 19)),
            ..Default::default()
        };
        assert!(by_range.matches(&uber));
        assert!(!by_range.matches(&bolt));
    }

    #[test]
    fn test_expense_filter_includes_whole_end_day() {
        let late = Utc.with_ymd_and_hms(2024, 1, 19, 23, 30, 0).unwrap();
        let expense = Expense::manual("1", 500, "Parking", "Car park", late);

        let filter = ExpenseFilter {
            category: Some("Parking".into()),
            from_date: Some(date(2024, 1, 1)),
            to_date: Some(date(2024, 1, 19)),
        };
        assert!(filter.matches(&expense));

        let other = ExpenseFilter {
            category: Some("Fuel".into()),
            ..Default::default()
        };
        assert!(!other.matches(&expense));
    }

    #[test]
    fn test_apply_against_store() {
        let mut store = LedgerStore::new();
        store.add_earning(Earning::new("1", 1000, "Uber", 1, 1.0, date(2024, 1, 10)));
        store.add_earning(Earning::new("2", 2500, "Bolt", 1, 1.0, date(2024, 1, 11)));
        store.add_earning(Earning::new("3", 4000, "Uber", 1, 1.0, date(2024, 1, 12)));

        let uber = EarningFilter {
            platform: Some("Uber".into()),
            ..Default::default()
        }
        .apply(&store);

        let ids: Vec<_> = uber.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(total_earned(&uber), 5000);
    }
}
