use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::{LedgerDerivations, TEMPLATE_CAP};
use crate::ledger::TemplateId;

const TEMPLATE_USAGE: &str = "template <save <name>|load <id>|delete <id>|list>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "template",
        "Save, load, delete or list ledger templates",
        TEMPLATE_USAGE,
        cmd_template,
    )]
}

fn cmd_template(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_templates(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "save" => save_template(context, rest),
        "load" | "apply" => load_template(context, rest),
        "delete" | "rm" => delete_template(context, rest),
        "list" | "ls" => list_templates(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown template action `{other}`"
        ))),
    }
}

fn template_id(args: &[&str], usage: &str) -> Result<TemplateId, CommandError> {
    match args {
        [id] => id
            .parse()
            .map_err(|_| CommandError::InvalidArguments(format!("invalid template id `{id}`"))),
        _ => Err(CommandError::usage(usage)),
    }
}

fn save_template(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    let template = context.session.save_template(&name)?;
    output::success(format!(
        "Saved template `{}` (id {}).",
        template.name, template.id
    ));
    if context.session.templates().list().len() == TEMPLATE_CAP {
        output::hint(format!("Only the newest {TEMPLATE_CAP} templates are kept."));
    }
    Ok(())
}

fn load_template(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = template_id(args, "template load <id>")?;
    if !context.confirm("Replace the current ledger with this template?")? {
        output::info("Template not loaded.");
        return Ok(());
    }
    if context.session.load_template(id) {
        output::success(format!("Loaded template {id}."));
    } else {
        output::warning(format!("No template with id {id}."));
    }
    Ok(())
}

fn delete_template(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = template_id(args, "template delete <id>")?;
    if context.session.templates_mut().delete(id) {
        output::success(format!("Deleted template {id}."));
    } else {
        output::warning(format!("No template with id {id}."));
    }
    Ok(())
}

fn list_templates(context: &mut ShellContext) -> CommandResult {
    let templates = context.session.templates().list();
    if templates.is_empty() {
        output::info("No templates saved yet.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("Id"),
        TableColumn::left("Name"),
        TableColumn::left("Created"),
        TableColumn::right("Expenses"),
        TableColumn::right("Total"),
        TableColumn::left("Mode"),
    ]);
    for template in templates {
        let state = template.ledger_state();
        table.add_row([
            template.id.to_string(),
            template.name.clone(),
            template.created_at.format("%Y-%m-%d %H:%M").to_string(),
            template.records.len().to_string(),
            format!("{} {:.2}", template.currency, state.total()),
            template.mode.to_string(),
        ]);
    }
    table.print();
    Ok(())
}
