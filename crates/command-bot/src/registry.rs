//! Registry of available commands.

use crate::commands::CommandHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Commands keyed by name.
///
/// Filled once at startup, then shared read-only behind an `Arc`.
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. A later registration under the same name replaces
    /// the earlier one.
    pub fn register(&mut self, command: Arc<dyn CommandHandler>) {
        let name = command.name().to_string();
        if let Some(previous) = self.commands.insert(name.clone(), command) {
            warn!(
                "Command '{}' registered twice; replacing the {} version",
                name,
                previous.category()
            );
        }
    }

    /// Get a command by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(name).cloned()
    }

    /// All commands, ordered by category then name.
    pub fn list(&self) -> Vec<Arc<dyn CommandHandler>> {
        let mut commands: Vec<_> = self.commands.values().cloned().collect();
        commands.sort_by(|a, b| {
            a.category()
                .cmp(b.category())
                .then_with(|| a.name().cmp(b.name()))
        });
        commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
