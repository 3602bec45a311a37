use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let mut table = Table::new(vec![TableColumn::left("Command"), TableColumn::left("Description")]);
    for entry in registry.list() {
        table.add_row([entry.name, entry.description]);
    }
    table.print();
    output::hint("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::line(entry.description);
    output::line(format!("usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        output::line(format!("aliases: {}", entry.aliases.join(", ")));
    }
}
