use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{mileage_cents, Cents, EntryId};

pub const MILEAGE_CATEGORY: &str = "Mileage";

/// How an expense amount came about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExpenseKind {
    /// Amount entered by hand
    Manual,
    /// Amount derived from distance driven, frozen at creation time
    Mileage {
        miles: f64,
        #[serde(rename = "costPerMile")]
        cost_per_mile: f64,
    },
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Manual => "manual",
            ExpenseKind::Mileage { .. } => "mileage",
        }
    }
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One cost item. Unlike [`super::Earning`], `date` is a full timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: EntryId,
    pub amount: Cents,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ExpenseKind,
}

impl Expense {
    pub fn manual(
        id: impl Into<EntryId>,
        amount: Cents,
        category: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            description: description.into(),
            date,
            kind: ExpenseKind::Manual,
        }
    }

    /// Mileage expense. The amount is computed here and stored; later changes
    /// to the rate never touch existing entries.
    pub fn mileage(
        id: impl Into<EntryId>,
        miles: f64,
        cost_per_mile: f64,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount: mileage_cents(miles, cost_per_mile),
            category: MILEAGE_CATEGORY.to_string(),
            description: description.into(),
            date,
            kind: ExpenseKind::Mileage {
                miles,
                cost_per_mile,
            },
        }
    }

    pub fn is_mileage(&self) -> bool {
        matches!(self.kind, ExpenseKind::Mileage { .. })
    }

    pub fn miles(&self) -> Option<f64> {
        match self.kind {
            ExpenseKind::Mileage { miles, .. } => Some(miles),
            ExpenseKind::Manual => None,
        }
    }

    pub fn cost_per_mile(&self) -> Option<f64> {
        match self.kind {
            ExpenseKind::Mileage { cost_per_mile, .. } => Some(cost_per_mile),
            ExpenseKind::Manual => None,
        }
    }
}
