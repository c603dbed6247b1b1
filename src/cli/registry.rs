use std::collections::HashMap;

use strsim::levenshtein;

use crate::cli::context::ShellContext;
use crate::cli::core::CommandResult;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Largest edit distance still offered as a "did you mean" suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Commands keyed by name, listed in registration order. Aliases resolve to
/// a registered name and are never listed.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    aliases: HashMap<&'static str, &'static str>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn alias(&mut self, alias: &'static str, target: &'static str) {
        self.aliases.insert(alias, target);
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        let name = self.aliases.get(name).copied().unwrap_or(name);
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Closest registered name or alias to an unknown input.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_ascii_lowercase();
        self.names()
            .chain(self.aliases.keys().copied())
            .map(|name| (levenshtein(name, &input), name))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min()
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::CommandResult;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("next", "", "next", noop));
        registry.register(CommandEntry::new("back", "", "back", noop));
        registry.register(CommandEntry::new("status", "", "status", noop));
        registry.alias("prev", "back");
        registry
    }

    #[test]
    fn aliases_resolve_but_are_not_listed() {
        let registry = registry();
        assert_eq!(registry.get("prev").map(|entry| entry.name), Some("back"));
        assert_eq!(
            registry.list().iter().map(|entry| entry.name).collect::<Vec<_>>(),
            vec!["next", "back", "status"]
        );
    }

    #[test]
    fn suggestions_stay_within_distance() {
        let registry = registry();
        assert_eq!(registry.suggest("nxt"), Some("next"));
        assert_eq!(registry.suggest("STATSU"), Some("status"));
        assert_eq!(registry.suggest("completely-different"), None);
    }
}
