//! Dispatch, argument helpers and error types shared by all commands.

use std::{collections::HashMap, io, path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::ConfigManager,
    core::BudgetSession,
    currency::{format_currency, CurrencyDisplay},
    errors::LedgerError,
    ledger::{Category, ExpenseId},
    storage::JsonFileStore,
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {usage}"))
    }
}

/// Failures that end the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Ledger(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Ledger(LedgerError::Io(err))
    }
}

impl ShellContext {
    /// Builds a context rooted at `$BUDGET_LEDGER_HOME` (or `~/.budget_ledger`).
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::from_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        Self::from_config_manager(mode, ConfigManager::with_base_dir(base)?)
    }

    fn from_config_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let storage = JsonFileStore::new(Some(config_manager.data_dir()))?;
        let session = BudgetSession::open(Arc::new(storage), config.session_options());
        output::set_preferences(output::OutputPreferences {
            plain: mode == CliMode::Script,
            quiet: false,
        });

        Ok(ShellContext {
            mode,
            registry,
            session,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        let state = self.session.ledger().state();
        format!("budget [{} {}]> ", state.mode, state.currency)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Formats `amount` in the ledger currency with the configured locale.
    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency(
            amount,
            &self.session.ledger().state().currency,
            self.session.locale(),
            CurrencyDisplay::Symbol,
        )
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Did you mean `{}`?", name));
            }
        }
    }

    /// Asks for confirmation in interactive mode; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(LedgerError::Validation(message)) => {
                output::error(message);
                Ok(())
            }
            other => {
                tracing::debug!(error = ?other, "command failed");
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }
}

/// Positional arguments plus `--name [value]` options.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: HashMap<String, Option<&'a str>>,
}

impl<'a> ParsedArgs<'a> {
    /// Options listed in `valued` consume the following token as their value;
    /// any other `--option` is a bare switch.
    pub fn parse(args: &[&'a str], valued: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            let name = name.to_ascii_lowercase();
            if valued.contains(&name.as_str()) {
                let value = iter.next().ok_or_else(|| {
                    CommandError::InvalidArguments(format!("option `--{name}` needs a value"))
                })?;
                parsed.options.insert(name, Some(value));
            } else {
                parsed.options.insert(name, None);
            }
        }
        Ok(parsed)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied().flatten()
    }
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    input
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid amount `{}`", input)))
}

pub(crate) fn parse_id(input: &str) -> Result<ExpenseId, CommandError> {
    input
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid id `{}`", input)))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_category(input: &str) -> Result<Category, CommandError> {
    input
        .parse()
        .map_err(|err: LedgerError| CommandError::InvalidArguments(err.to_string()))
}

pub(crate) fn parse_bool(input: &str) -> Result<bool, CommandError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" | "1" => Ok(true),
        "no" | "n" | "false" | "off" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected yes or no, got `{}`",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base: PathBuf,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::with_base_dir(CliMode::Script, base)?;
    for line in lines {
        match context.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LedgerDerivations;
    use tempfile::TempDir;

    #[test]
    fn parsed_args_split_options_from_positionals() {
        let args = ["Tokyo", "--sort", "oldest", "--apply", "hotel"];
        let parsed = ParsedArgs::parse(&args, &["sort"]).unwrap();
        assert_eq!(parsed.positional, ["Tokyo", "hotel"]);
        assert_eq!(parsed.value("sort"), Some("oldest"));
        assert!(parsed.flag("apply"));
        assert!(ParsedArgs::parse(&["--sort"], &["sort"]).is_err());
    }

    #[test]
    fn value_parsers_reject_garbage() {
        assert_eq!(parse_amount("1,250.5").unwrap(), 1250.5);
        assert!(parse_amount("NaN").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert_eq!(parse_category("food").unwrap(), Category::Food);
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn script_adds_and_removes_expenses() {
        let temp = TempDir::new().unwrap();
        let context = process_script(
            temp.path().to_path_buf(),
            &[
                "add Taxi 30 transport 2025-10-14",
                "goal 2000",
                "mode monthly",
            ],
        )
        .unwrap();
        let state = context.session.ledger().state();
        assert_eq!(state.records.len(), 4);
        assert_eq!(state.records[0].name, "Taxi");
        assert_eq!(state.total(), 960.0);
        assert_eq!(state.goal, 2000.0);
        assert_eq!(state.mode.as_str(), "Monthly");

        let id = state.records[0].id;
        let context = process_script(temp.path().to_path_buf(), &[&format!("remove {id}")])
            .unwrap();
        assert_eq!(context.session.ledger().records().len(), 3);
    }

    #[test]
    fn invalid_add_reports_error_without_mutation() {
        let temp = TempDir::new().unwrap();
        let mut context =
            ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf()).unwrap();
        let err = context.process_line("add \"  \" 10 food").unwrap_err();
        assert!(matches!(err, CommandError::Ledger(LedgerError::Validation(_))));
        assert_eq!(context.session.ledger().records().len(), 3);
    }

    #[test]
    fn exit_stops_script() {
        let temp = TempDir::new().unwrap();
        let context = process_script(
            temp.path().to_path_buf(),
            &["exit", "add Never 10 food 2025-10-14"],
        )
        .unwrap();
        assert_eq!(context.session.ledger().records().len(), 3);
    }

    #[test]
    fn reset_is_auto_confirmed_in_scripts() {
        let temp = TempDir::new().unwrap();
        let context = process_script(temp.path().to_path_buf(), &["reset"]).unwrap();
        assert!(context.session.ledger().records().is_empty());
        assert_eq!(context.session.ledger().state().goal, 0.0);
    }

    #[test]
    fn template_round_trip_through_commands() {
        let temp = TempDir::new().unwrap();
        let mut context = process_script(
            temp.path().to_path_buf(),
            &["template save Tokyo trip", "reset"],
        )
        .unwrap();
        let id = context.session.templates().list()[0].id;
        assert_eq!(context.session.templates().list()[0].name, "Tokyo trip");
        context.process_line(&format!("template load {id}")).unwrap();
        assert_eq!(context.session.ledger().records().len(), 3);
    }

    #[test]
    fn export_command_writes_into_directory() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        process_script(
            temp.path().to_path_buf(),
            &[&format!("export csv \"{}\"", out.display())],
        )
        .unwrap();
        let files: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
