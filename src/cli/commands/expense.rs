use chrono::Local;

use crate::cli::core::{
    parse_amount, parse_bool, parse_category, parse_date, parse_id, CommandError, CommandResult,
    ParsedArgs, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::{LedgerDerivations, SortKey};
use crate::ledger::{Expense, ExpenseDraft};

const ADD_USAGE: &str = "add <name> <amount> <category> [YYYY-MM-DD] [--recurring]";
const EDIT_USAGE: &str = "edit <id> [--name N] [--amount A] [--category C] [--date D] [--recurring yes|no]";
const LIST_USAGE: &str = "list [query] [--sort newest|oldest|amount-desc|amount-asc]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change fields of an expense", EDIT_USAGE, cmd_edit),
        CommandEntry::new("remove", "Delete an expense by id", "remove <id>", cmd_remove)
            .with_aliases(&["rm"]),
        CommandEntry::new("list", "Search and sort expenses", LIST_USAGE, cmd_list)
            .with_aliases(&["ls"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let [name, amount, category, rest @ ..] = parsed.positional.as_slice() else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    let date = match rest {
        [] => Local::now().date_naive(),
        [date] => parse_date(date)?,
        _ => return Err(CommandError::usage(ADD_USAGE)),
    };
    let draft = ExpenseDraft::new(
        *name,
        parse_amount(amount)?,
        parse_category(category)?,
        date,
        parsed.flag("recurring"),
    );
    let records = context.session.ledger_mut().add(draft)?;
    let added = records[0].clone();
    output::success(format!(
        "Added `{}` ({}) with id {}.",
        added.name,
        context.money(added.amount),
        added.id
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["name", "amount", "category", "date", "recurring"])?;
    let [id] = parsed.positional.as_slice() else {
        return Err(CommandError::usage(EDIT_USAGE));
    };
    let id = parse_id(id)?;
    let Some(current) = context.session.ledger().state().record(id).cloned() else {
        output::warning(format!("No expense with id {id}."));
        return Ok(());
    };

    let draft = ExpenseDraft::new(
        parsed.value("name").unwrap_or(current.name.as_str()),
        parsed.value("amount").map(parse_amount).transpose()?.unwrap_or(current.amount),
        parsed
            .value("category")
            .map(parse_category)
            .transpose()?
            .unwrap_or(current.category),
        parsed.value("date").map(parse_date).transpose()?.unwrap_or(current.date),
        parsed
            .value("recurring")
            .map(parse_bool)
            .transpose()?
            .unwrap_or(current.recurring),
    );
    if context.session.ledger_mut().edit(id, draft)? {
        output::success(format!("Updated expense {id}."));
    }
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::usage("remove <id>"));
    };
    let id = parse_id(id)?;
    if context.session.ledger_mut().remove(id) {
        output::success(format!("Removed expense {id}."));
    } else {
        output::warning(format!("No expense with id {id}."));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["sort"])?;
    let key = match parsed.value("sort") {
        Some(raw) => raw.parse::<SortKey>()?,
        None => SortKey::default(),
    };
    let query = parsed.positional.join(" ");
    let state = context.session.ledger().state();
    let records = state.filter_sort(&query, key);
    if records.is_empty() {
        output::info(if state.records.is_empty() {
            "No expenses recorded yet."
        } else {
            "No expenses match your search."
        });
        return Ok(());
    }
    expense_table(context, &records).print();
    output::hint(format!(
        "{} of {} expenses, sorted by {}.",
        records.len(),
        state.records.len(),
        key
    ));
    Ok(())
}

fn expense_table(context: &ShellContext, records: &[&Expense]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::right("Id"),
        TableColumn::left("Name"),
        TableColumn::right("Amount"),
        TableColumn::left("Category"),
        TableColumn::left("Date"),
        TableColumn::left("Recurring"),
    ]);
    for record in records {
        table.add_row([
            record.id.to_string(),
            record.name.clone(),
            context.money(record.amount),
            record.category.to_string(),
            record.date.format("%Y-%m-%d").to_string(),
            if record.recurring { "yes" } else { "" }.to_string(),
        ]);
    }
    table
}
