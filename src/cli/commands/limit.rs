use crate::cli::core::{parse_amount, parse_category, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::LedgerDerivations;

const LIMIT_USAGE: &str = "limit <category> [amount|clear]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "limit",
            "Show, set or clear a category spending limit",
            LIMIT_USAGE,
            cmd_limit,
        ),
        CommandEntry::new(
            "limits",
            "List category limits and their status",
            "limits",
            cmd_limits,
        ),
    ]
}

fn cmd_limit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (category, value) = match args {
        [category] => (parse_category(category)?, None),
        [category, value] => (parse_category(category)?, Some(*value)),
        _ => return Err(CommandError::usage(LIMIT_USAGE)),
    };
    let Some(value) = value else {
        match context.session.limits().limit(category) {
            Some(limit) => output::info(format!("{category} limit: {}", context.money(limit))),
            None => output::info(format!("{category} has no limit.")),
        }
        return Ok(());
    };

    let limit = if value.eq_ignore_ascii_case("clear") {
        None
    } else {
        Some(parse_amount(value)?)
    };
    context.session.limits_mut().set_limit(category, limit)?;
    match context.session.limits().limit(category) {
        Some(limit) => output::success(format!(
            "{category} limit set to {}.",
            context.money(limit)
        )),
        None => output::success(format!("{category} limit cleared.")),
    }
    Ok(())
}

fn cmd_limits(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let limits = context.session.limits().limits();
    if limits.is_empty() {
        output::info("No category limits set.");
        return Ok(());
    }
    let totals = context.session.ledger().state().category_totals();
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Spent"),
        TableColumn::right("Limit"),
        TableColumn::left("Status"),
    ]);
    for (category, limit) in limits.iter() {
        let spent = totals.get(&category).copied().unwrap_or(0.0);
        let status = if spent > limit { "OVER" } else { "ok" };
        table.add_row([
            category.to_string(),
            context.money(spent),
            context.money(limit),
            status.to_string(),
        ]);
    }
    table.print();
    Ok(())
}
