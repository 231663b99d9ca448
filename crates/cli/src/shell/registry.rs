//! Command registry - name to handler lookup
//!
//! The registry is filled once at startup, with each command module adding
//! its own entries, and is read-only while the loop runs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{Flow, Session};

/// Command shown when the input does not name a registered command
pub const HELP_COMMAND: &str = "h";

/// Trait for implementing shell commands
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Run the command with the trimmed remainder of the input line
    async fn run(&self, session: &mut Session, param: &str) -> Flow;
}

/// A registered command
#[derive(Clone)]
pub struct Command {
    /// Name typed at the prompt
    pub name: String,
    /// Short description (shown in help list)
    pub description: String,
    /// Handler invoked by the loop
    pub handler: Arc<dyn CommandHandler>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Flat mapping of command names to commands
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any previous command with the same name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) {
        let name = name.into();
        let command = Command {
            name: name.clone(),
            description: description.into(),
            handler: Arc::new(handler),
        };
        if self.commands.insert(name, command).is_some() {
            tracing::debug!("Replaced existing command registration");
        }
    }

    /// Find a command by name
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// All `(name, description)` pairs, sorted by name
    pub fn list_all(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name.as_str(), c.description.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
