mod common;

use anyhow::Result;
use chrono::Duration;
use common::{days_ago, earning, expense, fixed_now, store_at};
use shiftledger::domain::Expense;
use shiftledger::io::{Exporter, LedgerSnapshot};
use std::fs::File;
use std::io::Read;
use tempfile::tempdir;

#[test]
fn test_export_earnings_csv() -> Result<()> {
    let mut store = store_at(fixed_now());
    store.add_earning(earning("e1", 14550, days_ago(1)));
    store.add_earning(earning("e2", 8900, days_ago(0)));

    let dir = tempdir()?;
    let path = dir.path().join("earnings.csv");
    let count = Exporter::new(&store).export_earnings_csv(File::create(&path)?)?;
    assert_eq!(count, 2);

    let mut content = String::new();
    File::open(&path)?.read_to_string(&mut content)?;
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines[0], "id,date,platform,amount_cents,trips,hours");
    assert_eq!(lines[1], "e2,2024-01-15,Uber,8900,1,1");
    assert_eq!(lines[2], "e1,2024-01-14,Uber,14550,1,1");
    Ok(())
}

#[test]
fn test_export_expenses_csv() -> Result<()> {
    let now = fixed_now();
    let mut store = store_at(now);
    store.add_expense(expense("x1", "Fuel", 4520, now - Duration::hours(1)));
    store.add_expense(Expense::mileage("x2", 45.0, 0.545, "Business miles", now));

    let mut buffer = Vec::new();
    let count = Exporter::new(&store).export_expenses_csv(&mut buffer)?;
    assert_eq!(count, 2);

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers()?.clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "date", "type", "category", "description", "amount_cents", "miles", "cost_per_mile"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(&rows[0][2], "mileage");
    assert_eq!(&rows[0][3], "Mileage");
    assert_eq!(&rows[0][5], "2453");
    assert_eq!(&rows[0][6], "45");
    assert_eq!(&rows[0][7], "0.545");
    assert_eq!(&rows[1][2], "manual");
    assert_eq!(&rows[1][6], "");
    Ok(())
}

#[test]
fn test_export_full_json_snapshot() -> Result<()> {
    let now = fixed_now();
    let mut store = store_at(now);
    store.add_earning(earning("e1", 12000, days_ago(0)));
    store.add_expense(Expense::mileage("x1", 10.0, 0.45, "Airport", now));

    let dir = tempdir()?;
    let path = dir.path().join("ledger.json");
    let snapshot = Exporter::new(&store).export_full_json(File::create(&path)?)?;
    assert_eq!(snapshot.exported_at, now);

    let parsed: LedgerSnapshot = serde_json::from_reader(File::open(&path)?)?;
    assert_eq!(parsed.earnings, store.list_earnings());
    assert_eq!(parsed.expenses, store.list_expenses());

    let raw: serde_json::Value = serde_json::from_reader(File::open(&path)?)?;
    assert_eq!(raw["earnings"][0]["date"], "2024-01-15");
    assert_eq!(raw["expenses"][0]["type"], "mileage");
    assert_eq!(raw["expenses"][0]["costPerMile"], 0.45);
    Ok(())
}
