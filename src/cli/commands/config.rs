use std::path::PathBuf;

use crate::cli::core::{parse_amount, parse_bool, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::session::MAX_BUFFER_PERCENT;
use crate::currency::{CurrencyCode, LocaleConfig};
use crate::ledger::PlanningMode;

const CONFIG_KEYS: &str =
    "default_currency|default_mode|buffer_percent|seed_demo_ledger|export_dir|locale";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change saved preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn locale_template(tag: &str) -> Option<LocaleConfig> {
    let (decimal_separator, grouping_separator) = match tag {
        "en-US" | "en-GB" | "en-IN" | "ja-JP" => ('.', ','),
        "fr-FR" => (',', ' '),
        "de-DE" => (',', '.'),
        _ => return None,
    };
    Some(LocaleConfig {
        language_tag: tag.to_string(),
        decimal_separator,
        grouping_separator,
    })
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action, key, value @ ..] if action.eq_ignore_ascii_case("set") && !value.is_empty() => {
            set_config_value(context, key, value.join(" ").trim())
        }
        _ => Err(CommandError::usage(&format!(
            "config [show|set <{CONFIG_KEYS}> <value>]"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    let mut table = Table::new(vec![TableColumn::left("Key"), TableColumn::left("Value")]);
    table.add_row(["default_currency".to_string(), config.default_currency.to_string()]);
    table.add_row(["default_mode".to_string(), config.default_mode.to_string()]);
    table.add_row(["buffer_percent".to_string(), config.buffer_percent.to_string()]);
    table.add_row(["seed_demo_ledger".to_string(), config.seed_demo_ledger.to_string()]);
    table.add_row([
        "export_dir".to_string(),
        context
            .config_manager
            .export_dir(config)
            .display()
            .to_string(),
    ]);
    table.add_row(["locale".to_string(), config.locale.language_tag.clone()]);
    table.print();
    output::hint(format!("Stored at {}", context.config_manager.path().display()));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let config = &mut context.config;
    match key.to_ascii_lowercase().as_str() {
        "default_currency" => config.default_currency = CurrencyCode::parse(value)?,
        "default_mode" => config.default_mode = value.parse::<PlanningMode>()?,
        "buffer_percent" => {
            let percent = parse_amount(value)?;
            if !(0.0..=MAX_BUFFER_PERCENT).contains(&percent) {
                return Err(CommandError::InvalidArguments(format!(
                    "buffer_percent must be between 0 and {MAX_BUFFER_PERCENT}"
                )));
            }
            config.buffer_percent = percent;
        }
        "seed_demo_ledger" => config.seed_demo_ledger = parse_bool(value)?,
        "export_dir" => {
            config.export_dir = if value.is_empty() || value.eq_ignore_ascii_case("default") {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        "locale" => {
            config.locale = locale_template(value).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown locale `{value}` (try en-US, en-GB, en-IN, ja-JP, fr-FR or de-DE)"
                ))
            })?;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}` (expected {CONFIG_KEYS})"
            )))
        }
    }
    context.persist_config()?;
    output::success(format!("Saved {key} = {value}."));
    output::hint("New settings apply from the next session.");
    Ok(())
}
