use booking_config::Config;

use crate::cli::context::ShellContext;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config [show|set <key> <value>|backup [note]|backups|restore [name]]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change settings for the shell and the service",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return show_config(context);
    };

    match action.to_ascii_lowercase().as_str() {
        "show" => show_config(context),
        "set" => {
            let Some((key, value)) = rest.split_first().filter(|(_, value)| !value.is_empty())
            else {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            };
            set_value(context, key, &value.join(" "))
        }
        "backup" => {
            let note = (!rest.is_empty()).then(|| rest.join(" "));
            let name = context
                .config_manager
                .backup(&context.config, note.as_deref())?;
            io::print_success(format!("Configuration saved as `{name}`."));
            Ok(())
        }
        "backups" => list_backups(context),
        "restore" => {
            let name = match rest.first() {
                Some(name) => (*name).to_string(),
                None => match select_backup(context)? {
                    Some(name) => name,
                    None => {
                        io::print_info("Operation cancelled.");
                        return Ok(());
                    }
                },
            };
            restore(context, &name)
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    io::print_info(format!(
        "  File: {}",
        context.config_manager.config_path().display()
    ));
    let rows = Config::KEYS
        .iter()
        .map(|key| context.config.value(key).map(|value| (*key, value)))
        .collect::<Result<Vec<_>, _>>()?;
    output::rows(&rows);
    Ok(())
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set_value(key, value)?;
    context.config_manager.save(&updated)?;
    context.config = updated;

    if key.to_ascii_lowercase().starts_with("client.") {
        context.reload_clients()?;
    }
    io::print_success(format!(
        "{} = {}",
        key.to_ascii_lowercase(),
        context.config.value(key)?
    ));
    Ok(())
}

fn list_backups(context: &ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups yet.");
        return Ok(());
    }
    output::section("Configuration backups");
    for (idx, name) in backups.iter().enumerate() {
        io::print_info(format!("  {:>2}. {name}", idx + 1));
    }
    Ok(())
}

/// Accepts a file name or a 1-based position from `config backups`.
fn resolve_backup(context: &ShellContext, reference: &str) -> Result<String, CommandError> {
    if let Ok(position) = reference.parse::<usize>() {
        let backups = context.config_manager.list_backups()?;
        return position
            .checked_sub(1)
            .and_then(|idx| backups.get(idx).cloned())
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("no backup at position {position}"))
            });
    }
    Ok(reference.to_string())
}

fn select_backup(context: &ShellContext) -> Result<Option<String>, CommandError> {
    if !context.can_prompt() {
        return Err(CommandError::InvalidArguments(
            "usage: config restore <name|number>".into(),
        ));
    }
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups yet.");
        return Ok(None);
    }
    let items: Vec<&str> = backups.iter().map(String::as_str).collect();
    let choice = io::select(&context.theme, "Restore which backup?", &items, 0)?;
    Ok(backups.get(choice).cloned())
}

fn restore(context: &mut ShellContext, reference: &str) -> CommandResult {
    let name = resolve_backup(context, reference)?;
    let restored = context.config_manager.restore(&name)?;
    context.config_manager.save(&restored)?;
    context.config = restored;
    context.reload_clients()?;
    io::print_success(format!("Configuration restored from `{name}`."));
    Ok(())
}
