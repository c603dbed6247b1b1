use crate::cli::io;
use crate::cli::output::section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    for entry in registry.list() {
        io::print_info(format!("  {:<14} {}", entry.name, entry.description));
    }
    io::print_hint("Use `help <command>` for details. Fields accept their short name, e.g. `set email ada@example.com`.");
}

pub fn print_command(entry: &CommandEntry) {
    section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
}
