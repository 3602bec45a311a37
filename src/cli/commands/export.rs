use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::export::ExportFormat;

const EXPORT_USAGE: &str = "export <csv|json|pdf> [directory]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Write the ledger as CSV, JSON or a PDF report",
        EXPORT_USAGE,
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (format, dir) = match args {
        [format] => (format.parse::<ExportFormat>()?, None),
        [format, dir] => (format.parse::<ExportFormat>()?, Some(PathBuf::from(dir))),
        _ => return Err(CommandError::usage(EXPORT_USAGE)),
    };
    let dir = dir.unwrap_or_else(|| context.config_manager.export_dir(&context.config));
    let path = context.session.export_to(&dir, format)?;
    output::success(format!("Exported {} to {}", format, path.display()));
    Ok(())
}
