use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Typos further than this from every command get no suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

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

    /// Usage text after the command word, e.g. ` AMOUNT d/DESCRIPTION`.
    pub fn arguments(&self) -> &'static str {
        self.usage.strip_prefix(self.name).unwrap_or("")
    }
}

/// FinBro's command table. `help` lists entries in the order they were
/// registered; registering a name twice replaces the entry in place.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    /// Case-insensitive lookup by command word.
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Nearest command to a mistyped word, if one is close enough.
    /// Ties go to the command registered first.
    pub fn closest(&self, input: &str) -> Option<&CommandEntry> {
        let needle = input.to_lowercase();
        self.entries
            .iter()
            .map(|entry| (levenshtein(&needle, entry.name), entry))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, entry)| entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("summary", "Monthly report", "summary [m/MONTH]", noop));
        registry.register(CommandEntry::new("search", "Find by keyword", "search KEYWORD", noop));
        registry
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(registry().get("SUMMARY").map(|e| e.name), Some("summary"));
        assert!(registry().get("sum").is_none());
    }

    #[test]
    fn reregistering_keeps_position() {
        let mut registry = registry();
        registry.register(CommandEntry::new("summary", "Replaced", "summary", noop));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["summary", "search"]);
        assert_eq!(registry.get("summary").map(|e| e.description), Some("Replaced"));
    }

    #[test]
    fn closest_suggests_only_near_misses() {
        let registry = registry();
        assert_eq!(registry.closest("sumary").map(|e| e.name), Some("summary"));
        assert_eq!(registry.closest("serch").map(|e| e.name), Some("search"));
        assert!(registry.closest("balance").is_none());
    }

    #[test]
    fn arguments_strip_the_command_word() {
        let registry = registry();
        assert_eq!(registry.get("search").map(CommandEntry::arguments), Some(" KEYWORD"));
    }
}
