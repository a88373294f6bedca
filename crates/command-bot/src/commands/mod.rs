//! Bot command handlers.

mod eval;
mod help;
mod ping;
mod say;

pub use eval::{evaluate, EvalCommand};
pub use help::HelpCommand;
pub use ping::PingCommand;
pub use say::SayCommand;

use crate::context::CommandContext;
use crate::error::AppResult;
use crate::registry::CommandRegistry;
use async_trait::async_trait;
use discord_client::SentMessage;
use std::sync::Arc;

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name, matched against the first token after the prefix.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Argument synopsis shown by `help` (e.g. "<message...>").
    fn usage(&self) -> &str;

    /// Group shown by `help`.
    fn category(&self) -> &str {
        "general"
    }

    /// Minimum admin level, if the command is restricted.
    fn level(&self) -> Option<u32> {
        None
    }

    /// Execute the command.
    async fn exec(&self, ctx: &CommandContext) -> AppResult<SentMessage>;
}

/// Registry holding every built-in command.
pub fn builtin_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(PingCommand::new()));
    registry.register(Arc::new(SayCommand::new()));
    registry.register(Arc::new(EvalCommand::new()));
    registry.register(Arc::new(HelpCommand::new()));
    registry
}
