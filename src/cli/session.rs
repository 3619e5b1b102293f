use anyhow::Result;
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use crate::application::{new_entry_id, EarningForm, ExpenseForm, InputError};
use crate::domain::{format_cents, Expense};
use crate::store::LedgerStore;

use super::{write_dashboard, write_earnings_table, write_expenses_table};

const HELP: &str = "\
Commands:
  earning <amount> <platform> <trips> <hours> [YYYY-MM-DD]
  edit-earning <id> <amount> <platform> <trips> <hours> <YYYY-MM-DD>
  expense <amount> <category> [description...]
  mileage <miles> [description...]
  edit-expense <id> <amount> [category] [description...]
  edit-expense <id> <miles> [description...]       (mileage entries)
  delete-earning <id>
  delete-expense <id>
  list
  help
  quit";

/// Line-oriented editing loop over `store`.
///
/// A subscription flags every change; the dashboard is re-rendered once the
/// command that caused it has finished.
pub fn run_session<R: BufRead, W: Write>(
    store: &mut LedgerStore,
    input: R,
    mut out: W,
    cost_per_mile: f64,
) -> Result<()> {
    let dirty = Rc::new(Cell::new(false));
    let subscription = {
        let dirty = Rc::clone(&dirty);
        store.subscribe(move || dirty.set(true))
    };

    writeln!(out, "Type 'help' for commands.")?;
    write_dashboard(&mut out, store)?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "list" => {
                write_earnings_table(&mut out, &store.list_earnings())?;
                writeln!(out)?;
                write_expenses_table(&mut out, &store.list_expenses())?;
            }
            _ => match apply_command(store, command, args, cost_per_mile) {
                Ok(Some(message)) => writeln!(out, "{}", message)?,
                Ok(None) => writeln!(out, "Unknown command '{}'. Type 'help'.", command)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
        }

        if dirty.replace(false) {
            write_dashboard(&mut out, store)?;
        }
    }

    subscription.unsubscribe();
    Ok(())
}

/// Run one mutating command. `Ok(None)` means the command is unknown.
fn apply_command(
    store: &mut LedgerStore,
    command: &str,
    args: &[&str],
    cost_per_mile: f64,
) -> Result<Option<String>, InputError> {
    let message = match command {
        "earning" => {
            let form = EarningForm::new(store.now().date_naive());
            let earning = earning_form(args, form).into_earning(new_entry_id())?;
            let message = format!(
                "Earning added: {} on {} ({})",
                format_cents(earning.amount),
                earning.platform,
                earning.id
            );
            store.add_earning(earning);
            message
        }
        "edit-earning" => {
            let id = arg(args, 0, "id")?;
            let rest = args.get(1..).unwrap_or_default();
            let earning = earning_form(rest, EarningForm::default()).into_earning(id)?;
            store.update_earning(earning);
            format!("Earning updated: {}", id)
        }
        "expense" => {
            let form = ExpenseForm::Manual {
                amount: arg(args, 0, "amount")?.to_string(),
                category: arg(args, 1, "category")?.to_string(),
                custom_category: String::new(),
                description: args.get(2..).unwrap_or_default().join(" "),
            };
            let expense = form.into_expense(new_entry_id(), store.now())?;
            let message = format!(
                "Expense added: {} for {} ({})",
                format_cents(expense.amount),
                expense.category,
                expense.id
            );
            store.add_expense(expense);
            message
        }
        "mileage" => {
            let form = ExpenseForm::Mileage {
                miles: arg(args, 0, "miles")?.to_string(),
                cost_per_mile: cost_per_mile.to_string(),
                description: args.get(1..).unwrap_or_default().join(" "),
            };
            let expense = form.into_expense(new_entry_id(), store.now())?;
            let message = format!(
                "Mileage logged: {} ({})",
                format_cents(expense.amount),
                expense.id
            );
            store.add_expense(expense);
            message
        }
        "edit-expense" => {
            let id = arg(args, 0, "id")?;
            let existing = store
                .list_expenses()
                .into_iter()
                .find(|e| e.id == id)
                .ok_or_else(|| InputError::UnknownEntry {
                    kind: "expense",
                    id: id.to_string(),
                })?;
            let rest = args.get(1..).unwrap_or_default();
            let expense = edited_expense_form(&existing, rest)?.into_expense(id, existing.date)?;
            let message = format!("Expense updated: {} ({})", format_cents(expense.amount), id);
            store.update_expense(expense);
            message
        }
        "delete-earning" => {
            let id = arg(args, 0, "id")?;
            store.delete_earning(id);
            format!("Earning deleted: {}", id)
        }
        "delete-expense" => {
            let id = arg(args, 0, "id")?;
            store.delete_expense(id);
            format!("Expense deleted: {}", id)
        }
        _ => return Ok(None),
    };

    Ok(Some(message))
}

fn earning_form(args: &[&str], mut form: EarningForm) -> EarningForm {
    let field = |i: usize| args.get(i).map(|s| s.to_string()).unwrap_or_default();
    form.amount = field(0);
    form.platform = field(1);
    form.trips = field(2);
    form.hours = field(3);
    if let Some(date) = args.get(4) {
        form.date = date.to_string();
    }
    form
}

/// Start from the stored entry and overwrite whatever the command supplies.
fn edited_expense_form(existing: &Expense, args: &[&str]) -> Result<ExpenseForm, InputError> {
    let mut form = ExpenseForm::from_expense(existing);
    match &mut form {
        ExpenseForm::Manual {
            amount,
            category,
            description,
            ..
        } => {
            *amount = arg(args, 0, "amount")?.to_string();
            if let Some(new_category) = args.get(1) {
                *category = new_category.to_string();
            }
            if args.len() > 2 {
                *description = args[2..].join(" ");
            }
        }
        ExpenseForm::Mileage {
            miles, description, ..
        } => {
            *miles = arg(args, 0, "miles")?.to_string();
            if args.len() > 1 {
                *description = args[1..].join(" ");
            }
        }
    }
    Ok(form)
}

fn arg<'a>(args: &[&'a str], index: usize, name: &'static str) -> Result<&'a str, InputError> {
    args.get(index).copied().ok_or(InputError::MissingField(name))
}
