pub mod config;
pub mod content;
pub mod system;
pub mod wizard;

use crate::cli::registry::CommandRegistry;

/// Registers every shell command in the order `help` lists them.
pub fn register_all(registry: &mut CommandRegistry) {
    for entry in wizard::definitions()
        .into_iter()
        .chain(content::definitions())
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }

    registry.alias("prev", "back");
    registry.alias("previous", "back");
    registry.alias("submit", "next");
    registry.alias("quit", "exit");
    registry.alias("?", "help");
}
