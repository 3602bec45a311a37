pub mod config;
pub mod expense;
pub mod export;
pub mod ledger;
pub mod limit;
pub mod system;
pub mod template;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "add",
    "edit",
    "remove",
    "list",
    "summary",
    "breakdown",
    "goal",
    "suggest-goal",
    "currency",
    "mode",
    "buffer",
    "limit",
    "limits",
    "template",
    "export",
    "reset",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(ledger::definitions());
    commands.extend(limit::definitions());
    commands.extend(template::definitions());
    commands.extend(export::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_command_is_registered() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.list().map(|entry| entry.name).collect();
        assert_eq!(names, ROOT_COMMAND_ORDER);
    }
}
