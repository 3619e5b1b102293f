use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{format_cents, parse_cents, Earning, EntryId, Expense, ExpenseKind};

use super::InputError;

/// HMRC approved mileage rate used when the driver gives none.
pub const DEFAULT_COST_PER_MILE: f64 = 0.45;

/// Picker value meaning "use the free-text field instead".
pub const CUSTOM_CHOICE: &str = "custom";

pub const DEFAULT_MANUAL_DESCRIPTION: &str = "Manual expense";
pub const DEFAULT_MILEAGE_DESCRIPTION: &str = "Business mileage";

/// Fresh identifier for a new entry. The store expects callers to supply these.
pub fn new_entry_id() -> EntryId {
    Uuid::new_v4().to_string()
}

/// Raw earning input as typed by the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EarningForm {
    pub amount: String,
    pub platform: String,
    pub custom_platform: String,
    pub trips: String,
    pub hours: String,
    pub date: String,
}

impl EarningForm {
    /// Blank form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Form prefilled from an existing entry, for editing.
    pub fn from_earning(earning: &Earning) -> Self {
        Self {
            amount: format_cents(earning.amount),
            platform: earning.platform.clone(),
            custom_platform: String::new(),
            trips: earning.trips.to_string(),
            hours: earning.hours.to_string(),
            date: earning.date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn into_earning(self, id: impl Into<EntryId>) -> Result<Earning, InputError> {
        let amount = required("amount", &self.amount)?;
        let platform = required("platform", &self.platform)?;
        let trips = required("trips", &self.trips)?;
        let hours = required("hours", &self.hours)?;
        let date = required("date", &self.date)?;

        let platform = if platform == CUSTOM_CHOICE {
            required("custom platform", &self.custom_platform)?
        } else {
            platform
        };

        let amount = parse_cents(amount).map_err(|source| InputError::InvalidAmount {
            field: "amount",
            source,
        })?;
        let trips: u32 = trips.parse().map_err(|_| InputError::InvalidNumber {
            field: "trips",
            value: trips.to_string(),
        })?;
        let hours = parse_quantity("hours", hours)?;
        let date = parse_date(date)?;

        Ok(Earning::new(id, amount, platform, trips, hours, date))
    }
}

/// Raw expense input; the variant follows the manual/mileage toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseForm {
    Manual {
        amount: String,
        category: String,
        custom_category: String,
        description: String,
    },
    Mileage {
        miles: String,
        cost_per_mile: String,
        description: String,
    },
}

impl ExpenseForm {
    pub fn mileage() -> Self {
        ExpenseForm::Mileage {
            miles: String::new(),
            cost_per_mile: DEFAULT_COST_PER_MILE.to_string(),
            description: String::new(),
        }
    }

    /// Form prefilled from an existing entry, for editing. Mileage entries keep
    /// the rate they were logged with.
    pub fn from_expense(expense: &Expense) -> Self {
        match expense.kind {
            ExpenseKind::Manual => ExpenseForm::Manual {
                amount: format_cents(expense.amount),
                category: expense.category.clone(),
                custom_category: String::new(),
                description: expense.description.clone(),
            },
            ExpenseKind::Mileage {
                miles,
                cost_per_mile,
            } => ExpenseForm::Mileage {
                miles: miles.to_string(),
                cost_per_mile: cost_per_mile.to_string(),
                description: expense.description.clone(),
            },
        }
    }

    pub fn into_expense(
        self,
        id: impl Into<EntryId>,
        date: DateTime<Utc>,
    ) -> Result<Expense, InputError> {
        match self {
            ExpenseForm::Manual {
                amount,
                category,
                custom_category,
                description,
            } => {
                let amount = required("amount", &amount)?;
                let category = required("category", &category)?;
                let category = if category == CUSTOM_CHOICE {
                    required("custom category", &custom_category)?
                } else {
                    category
                };
                let amount = parse_cents(amount).map_err(|source| InputError::InvalidAmount {
                    field: "amount",
                    source,
                })?;

                Ok(Expense::manual(
                    id,
                    amount,
                    category,
                    or_default(&description, DEFAULT_MANUAL_DESCRIPTION),
                    date,
                ))
            }
            ExpenseForm::Mileage {
                miles,
                cost_per_mile,
                description,
            } => {
                let miles = parse_quantity("miles", required("miles", &miles)?)?;
                let cost_per_mile =
                    parse_quantity("cost per mile", required("cost per mile", &cost_per_mile)?)?;

                Ok(Expense::mileage(
                    id,
                    miles,
                    cost_per_mile,
                    or_default(&description, DEFAULT_MILEAGE_DESCRIPTION),
                    date,
                ))
            }
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(value.to_string()))
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::MissingField(field));
    }
    Ok(value)
}

fn parse_quantity(field: &'static str, value: &str) -> Result<f64, InputError> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(InputError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
