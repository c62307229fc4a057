//! Command and button routing. Handlers are looked up by name in registries
//! built once at startup.

use std::collections::HashMap;

pub mod join;
pub mod leaderboard;
pub mod user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    User,
    Leaderboard,
    Join,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Leaderboard,
}

#[derive(Debug, Clone)]
pub struct Registry<H> {
    handlers: HashMap<String, H>,
}

impl<H: Copy> Registry<H> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(mut self, name: impl Into<String>, handler: H) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<H> {
        self.handlers.get(name).copied()
    }
}

impl<H: Copy> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn command_registry() -> Registry<CommandKind> {
    Registry::new()
        .register("user", CommandKind::User)
        .register("leaderboard", CommandKind::Leaderboard)
        .register("join", CommandKind::Join)
}

pub fn button_registry() -> Registry<ButtonKind> {
    Registry::new().register(leaderboard::BUTTON_NAME, ButtonKind::Leaderboard)
}

/// Splits a button id like `leaderboard.123.2` into its name and arguments.
pub fn split_custom_id(custom_id: &str) -> (&str, Vec<&str>) {
    let mut parts = custom_id.split('.');
    let name = parts.next().unwrap_or_default();

    (name, parts.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_resolve_by_name() {
        let registry = command_registry();

        assert_eq!(registry.resolve("user"), Some(CommandKind::User));
        assert_eq!(registry.resolve("leaderboard"), Some(CommandKind::Leaderboard));
        assert_eq!(registry.resolve("join"), Some(CommandKind::Join));
        assert_eq!(registry.resolve("settings"), None);
    }

    #[test]
    fn buttons_resolve_by_prefix() {
        let registry = button_registry();
        let (name, args) = split_custom_id("leaderboard.42.3");

        assert_eq!(registry.resolve(name), Some(ButtonKind::Leaderboard));
        assert_eq!(args, vec!["42", "3"]);
    }

    #[test]
    fn bare_custom_id() {
        assert_eq!(split_custom_id("leaderboard"), ("leaderboard", vec![]));
    }
}
