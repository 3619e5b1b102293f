use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::{Earning, Expense};
use crate::store::LedgerStore;

/// Full ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub earnings: Vec<Earning>,
    pub expenses: Vec<Expense>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    store: &'a LedgerStore,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Export earnings to CSV format
    pub fn export_earnings_csv<W: Write>(&self, writer: W) -> Result<usize> {
        write_earnings_csv(&self.store.list_earnings(), writer)
    }

    /// Export expenses to CSV format
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        write_expenses_csv(&self.store.list_expenses(), writer)
    }

    /// Export the whole ledger as a JSON snapshot
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: self.store.now(),
            earnings: self.store.list_earnings(),
            expenses: self.store.list_expenses(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        tracing::debug!(
            earnings = snapshot.earnings.len(),
            expenses = snapshot.expenses.len(),
            "ledger snapshot exported"
        );
        Ok(snapshot)
    }
}

pub fn write_earnings_csv<W: Write>(earnings: &[Earning], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["id", "date", "platform", "amount_cents", "trips", "hours"])?;

    for earning in earnings {
        csv_writer.write_record(&[
            earning.id.clone(),
            earning.date.format("%Y-%m-%d").to_string(),
            earning.platform.clone(),
            earning.amount.to_string(),
            earning.trips.to_string(),
            earning.hours.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(earnings.len())
}

pub fn write_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "id",
        "date",
        "type",
        "category",
        "description",
        "amount_cents",
        "miles",
        "cost_per_mile",
    ])?;

    for expense in expenses {
        csv_writer.write_record(&[
            expense.id.clone(),
            expense.date.to_rfc3339(),
            expense.kind.as_str().to_string(),
            expense.category.clone(),
            expense.description.clone(),
            expense.amount.to_string(),
            expense.miles().map(|m| m.to_string()).unwrap_or_default(),
            expense
                .cost_per_mile()
                .map(|c| c.to_string())
                .unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(expenses.len())
}
