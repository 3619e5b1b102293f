mod session;

pub use session::run_session;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::Write;

use crate::application::{
    parse_date, target_report, total_earned, total_spent, DashboardSummary, EarningFilter,
    ExpenseFilter, WeeklyReport, DEFAULT_COST_PER_MILE,
};
use crate::domain::{format_cents, parse_cents, Earning, Expense, Target, TargetPeriod};
use crate::io::{write_earnings_csv, write_expenses_csv, Exporter};
use crate::store::LedgerStore;

/// Shiftledger - earnings and expenses for rideshare and delivery drivers
#[derive(Parser)]
#[command(name = "shiftledger")]
#[command(about = "Track shift earnings, expenses and income targets")]
#[command(version)]
pub struct Cli {
    /// Start from an empty ledger instead of the example entries
    #[arg(long, global = true)]
    pub empty: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Mileage rate applied to new mileage expenses
    #[arg(long, global = true, env = "SHIFTLEDGER_COST_PER_MILE", default_value_t = DEFAULT_COST_PER_MILE)]
    pub cost_per_mile: f64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's and this week's headline figures
    Dashboard {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List earnings
    Earnings {
        /// Filter by platform
        #[arg(long)]
        platform: Option<String>,

        /// Filter from date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Filter to date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List expenses
    Expenses {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Filter from date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Filter to date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Weekly analytics
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show progress towards income targets
    Targets {
        /// Daily target amount (e.g., "200")
        #[arg(long)]
        daily: Option<String>,

        /// Weekly target amount
        #[arg(long)]
        weekly: Option<String>,

        /// Monthly target amount
        #[arg(long)]
        monthly: Option<String>,

        /// Switch a target on or off: daily, weekly, monthly
        #[arg(long)]
        toggle: Vec<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export the ledger to CSV or JSON
    Export {
        /// What to export: earnings, expenses, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json (default: csv for lists, json for full)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Add, edit and delete entries interactively
    Session,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Earnings and expenses per day for the last seven days
    Weekly {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Hours worked per day for the last seven days
    Hours {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// This week's expenses by category
    Breakdown {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut store = if self.empty {
            LedgerStore::new()
        } else {
            LedgerStore::seeded()
        };
        tracing::debug!(
            earnings = store.list_earnings().len(),
            expenses = store.list_expenses().len(),
            "ledger ready"
        );

        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Dashboard { format } => match format.as_str() {
                "json" => {
                    let summary = DashboardSummary::build(&store);
                    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
                }
                _ => write_dashboard(&mut out, &store)?,
            },

            Commands::Earnings {
                platform,
                from,
                to,
                format,
            } => {
                let filter = EarningFilter {
                    platform,
                    from_date: parse_optional_date(from)?,
                    to_date: parse_optional_date(to)?,
                };
                let earnings = filter.apply(&store);
                match format.as_str() {
                    "json" => writeln!(out, "{}", serde_json::to_string_pretty(&earnings)?)?,
                    "csv" => {
                        write_earnings_csv(&earnings, &mut out)?;
                    }
                    _ => {
                        write_earnings_table(&mut out, &earnings)?;
                        writeln!(out, "{}", "-".repeat(88))?;
                        writeln!(out, "{:<60} {:>12}", "TOTAL", format_cents(total_earned(&earnings)))?;
                    }
                }
            }

            Commands::Expenses {
                category,
                from,
                to,
                format,
            } => {
                let filter = ExpenseFilter {
                    category,
                    from_date: parse_optional_date(from)?,
                    to_date: parse_optional_date(to)?,
                };
                let expenses = filter.apply(&store);
                match format.as_str() {
                    "json" => writeln!(out, "{}", serde_json::to_string_pretty(&expenses)?)?,
                    "csv" => {
                        write_expenses_csv(&expenses, &mut out)?;
                    }
                    _ => {
                        write_expenses_table(&mut out, &expenses)?;
                        writeln!(out, "{}", "-".repeat(97))?;
                        writeln!(out, "{:<69} {:>12}", "TOTAL", format_cents(total_spent(&expenses)))?;
                    }
                }
            }

            Commands::Report(report_cmd) => run_report_command(&mut out, &store, report_cmd)?,

            Commands::Targets {
                daily,
                weekly,
                monthly,
                toggle,
                format,
            } => {
                let targets = configure_targets(&store, daily, weekly, monthly, &toggle)?;
                run_targets_command(&mut out, &store, &targets, &format)?;
            }

            Commands::Export {
                export_type,
                output,
                format,
            } => run_export_command(&store, &export_type, output.as_deref(), format.as_deref())?,

            Commands::Session => {
                let stdin = std::io::stdin();
                run_session(&mut store, stdin.lock(), &mut out, self.cost_per_mile)?;
            }
        }

        Ok(())
    }
}

pub(crate) fn write_dashboard<W: Write>(out: &mut W, store: &LedgerStore) -> Result<()> {
    let summary = DashboardSummary::build(store);

    writeln!(out, "{:<10} {:>12} {:>12} {:>12}", "", "EARNED", "SPENT", "NET")?;
    writeln!(
        out,
        "{:<10} {:>12} {:>12} {:>12}",
        "Today",
        format_cents(summary.today_earnings),
        format_cents(summary.today_expenses),
        format_cents(summary.today_net)
    )?;
    writeln!(
        out,
        "{:<10} {:>12} {:>12} {:>12}",
        "7 days",
        format_cents(summary.weekly_earnings),
        format_cents(summary.weekly_expenses),
        format_cents(summary.weekly_net)
    )?;
    writeln!(
        out,
        "Trips: {}   Hours: {:.1}   Per hour: {}",
        summary.trips,
        summary.hours,
        format_cents(summary.hourly_rate)
    )?;
    Ok(())
}

pub(crate) fn write_earnings_table<W: Write>(out: &mut W, earnings: &[Earning]) -> Result<()> {
    if earnings.is_empty() {
        writeln!(out, "No earnings found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<36} {:<12} {:<10} {:>12} {:>6} {:>6}",
        "ID", "DATE", "PLATFORM", "AMOUNT", "TRIPS", "HOURS"
    )?;
    writeln!(out, "{}", "-".repeat(88))?;
    // Ids are printed whole so they can be fed back to edit and delete
    for earning in earnings {
        writeln!(
            out,
            "{:<36} {:<12} {:<10} {:>12} {:>6} {:>6.1}",
            earning.id,
            earning.date.format("%Y-%m-%d"),
            truncate(&earning.platform, 10),
            format_cents(earning.amount),
            earning.trips,
            earning.hours
        )?;
    }
    Ok(())
}

pub(crate) fn write_expenses_table<W: Write>(out: &mut W, expenses: &[Expense]) -> Result<()> {
    if expenses.is_empty() {
        writeln!(out, "No expenses found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<36} {:<17} {:<14} {:>12} {:<14}",
        "ID", "DATE", "CATEGORY", "AMOUNT", "DESCRIPTION"
    )?;
    writeln!(out, "{}", "-".repeat(97))?;
    for expense in expenses {
        writeln!(
            out,
            "{:<36} {:<17} {:<14} {:>12} {:<14}",
            expense.id,
            expense.date.format("%Y-%m-%d %H:%M"),
            truncate(&expense.category, 14),
            format_cents(expense.amount),
            truncate(&expense.description, 14)
        )?;
    }
    Ok(())
}

fn run_report_command<W: Write>(
    out: &mut W,
    store: &LedgerStore,
    cmd: ReportCommands,
) -> Result<()> {
    match cmd {
        ReportCommands::Weekly { format } => match format.as_str() {
            "json" => writeln!(out, "{}", serde_json::to_string_pretty(&WeeklyReport::build(store))?)?,
            "csv" => {
                writeln!(out, "day,earnings,expenses")?;
                for day in store.weekly_series() {
                    writeln!(out, "{},{},{}", day.day, day.earnings, day.expenses)?;
                }
            }
            _ => {
                writeln!(out, "{:<6} {:>12} {:>12}", "DAY", "EARNED", "SPENT")?;
                writeln!(out, "{}", "-".repeat(32))?;
                for day in store.weekly_series() {
                    writeln!(
                        out,
                        "{:<6} {:>12} {:>12}",
                        day.day,
                        format_cents(day.earnings),
                        format_cents(day.expenses)
                    )?;
                }
                writeln!(out, "{}", "-".repeat(32))?;
                writeln!(
                    out,
                    "{:<6} {:>12} {:>12}",
                    "TOTAL",
                    format_cents(store.weekly_earnings_total()),
                    format_cents(store.weekly_expenses_total())
                )?;
            }
        },

        ReportCommands::Hours { format } => match format.as_str() {
            "json" => writeln!(out, "{}", serde_json::to_string_pretty(&store.daily_hours_series())?)?,
            "csv" => {
                writeln!(out, "day,hours,earnings")?;
                for day in store.daily_hours_series() {
                    writeln!(out, "{},{},{}", day.day, day.hours, day.earnings)?;
                }
            }
            _ => {
                writeln!(out, "{:<6} {:>8} {:>12}", "DAY", "HOURS", "EARNED")?;
                writeln!(out, "{}", "-".repeat(28))?;
                for day in store.daily_hours_series() {
                    writeln!(
                        out,
                        "{:<6} {:>8.1} {:>12}",
                        day.day,
                        day.hours,
                        format_cents(day.earnings)
                    )?;
                }
                writeln!(out, "{}", "-".repeat(28))?;
                writeln!(
                    out,
                    "Average per hour: {}",
                    format_cents(store.weekly_hourly_rate())
                )?;
            }
        },

        ReportCommands::Breakdown { format } => {
            let breakdown = store.expense_breakdown();
            match format.as_str() {
                "json" => writeln!(out, "{}", serde_json::to_string_pretty(&breakdown)?)?,
                "csv" => {
                    writeln!(out, "category,amount,color")?;
                    for slice in &breakdown {
                        writeln!(out, "{},{},{}", slice.name, slice.value, slice.color)?;
                    }
                }
                _ => {
                    if breakdown.is_empty() {
                        writeln!(out, "No expenses in the last 7 days.")?;
                        return Ok(());
                    }
                    let total: i64 = breakdown.iter().map(|s| s.value).sum();
                    writeln!(out, "{:<20} {:>12} {:>8}", "CATEGORY", "AMOUNT", "PERCENT")?;
                    writeln!(out, "{}", "-".repeat(42))?;
                    for slice in &breakdown {
                        let percent = if total > 0 {
                            slice.value as f64 / total as f64 * 100.0
                        } else {
                            0.0
                        };
                        writeln!(
                            out,
                            "{:<20} {:>12} {:>7.1}%",
                            truncate(&slice.name, 20),
                            format_cents(slice.value),
                            percent
                        )?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn configure_targets(
    store: &LedgerStore,
    daily: Option<String>,
    weekly: Option<String>,
    monthly: Option<String>,
    toggle: &[String],
) -> Result<Vec<Target>> {
    let mut targets = Target::defaults(store.now());

    for (period, amount) in [
        (TargetPeriod::Daily, daily),
        (TargetPeriod::Weekly, weekly),
        (TargetPeriod::Monthly, monthly),
    ] {
        if let Some(amount) = amount {
            let cents = parse_cents(&amount)
                .with_context(|| format!("Invalid {} target '{}'. Use '200' or '200.00'", period, amount))?;
            for target in targets.iter_mut().filter(|t| t.period == period) {
                *target = target.clone().with_amount(cents);
            }
        }
    }

    for name in toggle {
        let period = TargetPeriod::from_str(name).ok_or_else(|| {
            anyhow::anyhow!("Invalid target '{}'. Valid: daily, weekly, monthly", name)
        })?;
        for target in targets.iter_mut().filter(|t| t.period == period) {
            *target = target.clone().toggled();
        }
    }

    Ok(targets)
}

fn run_targets_command<W: Write>(
    out: &mut W,
    store: &LedgerStore,
    targets: &[Target],
    format: &str,
) -> Result<()> {
    let report = target_report(store, targets);

    if format == "json" {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    if report.is_empty() {
        writeln!(out, "No targets enabled.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10} {:>12} {:>12} {:>12} {:>12} {:>8} {:<14}",
        "PERIOD", "TARGET", "CURRENT", "REMAINING", "PER DAY", "PERCENT", "TIME LEFT"
    )?;
    writeln!(out, "{}", "-".repeat(86))?;
    for progress in &report {
        writeln!(
            out,
            "{:<10} {:>12} {:>12} {:>12} {:>12} {:>7.1}% {:<14}",
            progress.target.period.as_str(),
            format_cents(progress.target.amount),
            format_cents(progress.current),
            format_cents(progress.remaining()),
            format_cents(progress.daily_needed()),
            progress.percentage,
            progress.time_left.to_string()
        )?;
    }

    let disabled = targets.len() - report.len();
    if disabled > 0 {
        writeln!(out, "({} target(s) switched off)", disabled)?;
    }
    Ok(())
}

fn run_export_command(
    store: &LedgerStore,
    export_type: &str,
    output: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Cannot create output file '{}'", path))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    let exporter = Exporter::new(store);

    let count = match (export_type, format.unwrap_or("csv")) {
        ("earnings", "csv") => exporter.export_earnings_csv(writer)?,
        ("expenses", "csv") => exporter.export_expenses_csv(writer)?,
        ("full", _) => {
            let snapshot = exporter.export_full_json(writer)?;
            snapshot.earnings.len() + snapshot.expenses.len()
        }
        ("earnings" | "expenses", other) => {
            anyhow::bail!("Unsupported format '{}' for {}. Use csv, or export full for json", other, export_type)
        }
        _ => anyhow::bail!(
            "Unknown export type '{}'. Valid: earnings, expenses, full",
            export_type
        ),
    };

    if let Some(path) = output {
        eprintln!("Exported {} record(s) to {}", count, path);
    }
    Ok(())
}

fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>> {
    value
        .map(|v| parse_date(&v))
        .transpose()
        .context("Date must be in YYYY-MM-DD format")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
