use crate::cli::core::{parse_amount, CommandError, CommandResult, ParsedArgs, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::LedgerDerivations;
use crate::currency::SUPPORTED_CURRENCIES;
use crate::ledger::PlanningMode;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals, goal progress and projection",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "breakdown",
            "Show spending per category",
            "breakdown [--all]",
            cmd_breakdown,
        ),
        CommandEntry::new("goal", "Show or set the budget goal", "goal [amount]", cmd_goal),
        CommandEntry::new(
            "suggest-goal",
            "Suggest a goal from current spending",
            "suggest-goal [--apply]",
            cmd_suggest_goal,
        ),
        CommandEntry::new(
            "currency",
            "Show or set the ledger currency",
            "currency [code]",
            cmd_currency,
        ),
        CommandEntry::new(
            "mode",
            "Show or switch the planning mode",
            "mode [trip|monthly|toggle]",
            cmd_mode,
        ),
        CommandEntry::new(
            "buffer",
            "Show or set the projection buffer percent (0-50)",
            "buffer [percent]",
            cmd_buffer,
        ),
        CommandEntry::new(
            "reset",
            "Clear all expenses and restore default settings",
            "reset",
            cmd_reset,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.session.summary();
    output::section("Summary");
    let mut table = Table::new(vec![TableColumn::left("Metric"), TableColumn::right("Value")]);
    table.add_row(["Total spent".to_string(), context.money(summary.total)]);
    table.add_row(["Goal".to_string(), context.money(summary.goal)]);
    table.add_row(["Progress".to_string(), format!("{}%", summary.progress)]);
    table.add_row([
        format!("Projected (+{}%)", summary.buffer_percent),
        context.money(summary.projected),
    ]);
    table.add_row(["Recurring".to_string(), summary.recurring_count.to_string()]);
    table.add_row(["Mode".to_string(), summary.mode.to_string()]);
    table.add_row(["Currency".to_string(), summary.currency.to_string()]);
    table.print();

    for category in &summary.over_budget {
        let limit = context.session.limits().limit(*category).unwrap_or_default();
        output::warning(format!(
            "{} is over its limit of {}.",
            category,
            context.money(limit)
        ));
    }
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let state = context.session.ledger().state();
    let rows: Vec<_> = if parsed.flag("all") {
        state.category_totals().into_iter().collect()
    } else {
        state.breakdown()
    };
    if rows.is_empty() {
        output::info("No spending to break down yet.");
        return Ok(());
    }
    let total = state.total();
    let limits = context.session.limits();
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Spent"),
        TableColumn::right("Share"),
        TableColumn::right("Limit"),
    ]);
    for (category, spent) in rows {
        let share = if total > 0.0 { spent / total * 100.0 } else { 0.0 };
        let limit = limits
            .limit(category)
            .map(|limit| context.money(limit))
            .unwrap_or_default();
        table.add_row([
            category.to_string(),
            context.money(spent),
            format!("{share:.0}%"),
            limit,
        ]);
    }
    table.print();
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let goal = context.session.ledger().state().goal;
            output::info(format!("Goal: {}", context.money(goal)));
        }
        [value] => {
            context.session.ledger_mut().set_goal(parse_amount(value)?)?;
            let goal = context.session.ledger().state().goal;
            output::success(format!("Goal set to {}.", context.money(goal)));
        }
        _ => return Err(CommandError::usage("goal [amount]")),
    }
    Ok(())
}

fn cmd_suggest_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    if parsed.flag("apply") {
        let goal = context.session.ledger_mut().apply_suggested_goal();
        output::success(format!("Goal set to {}.", context.money(goal)));
    } else {
        let state = context.session.ledger().state();
        output::info(format!(
            "Suggested {} goal: {}",
            state.mode,
            context.money(state.suggested_goal())
        ));
        output::hint("Run `suggest-goal --apply` to use it.");
    }
    Ok(())
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::info(format!(
                "Currency: {}",
                context.session.ledger().state().currency
            ));
            output::hint(format!("Common choices: {}", SUPPORTED_CURRENCIES.join(", ")));
        }
        [code] => {
            context.session.ledger_mut().set_currency(code)?;
            let currency = &context.session.ledger().state().currency;
            if !SUPPORTED_CURRENCIES.iter().any(|known| *known == currency.as_str()) {
                output::warning(format!("{currency} is not one of the common choices."));
            }
            output::success(format!("Currency set to {currency}."));
        }
        _ => return Err(CommandError::usage("currency [code]")),
    }
    Ok(())
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mode = match args {
        [] => {
            output::info(format!("Mode: {}", context.session.ledger().state().mode));
            return Ok(());
        }
        [value] if value.eq_ignore_ascii_case("toggle") => context.session.ledger_mut().toggle_mode(),
        [value] => {
            let mode: PlanningMode = value.parse()?;
            context.session.ledger_mut().set_mode(mode);
            mode
        }
        _ => return Err(CommandError::usage("mode [trip|monthly|toggle]")),
    };
    output::success(format!("Mode set to {mode}."));
    Ok(())
}

fn cmd_buffer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => output::info(format!("Buffer: {}%", context.session.buffer_percent())),
        [value] => {
            let percent = parse_amount(value.trim_end_matches('%'))?;
            context.session.set_buffer_percent(percent)?;
            output::success(format!("Buffer set to {percent}%."));
        }
        _ => return Err(CommandError::usage("buffer [percent]")),
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Delete all expenses and restore default settings?")? {
        output::info("Reset cancelled.");
        return Ok(());
    }
    context.session.ledger_mut().reset();
    output::success("Ledger reset.");
    Ok(())
}
