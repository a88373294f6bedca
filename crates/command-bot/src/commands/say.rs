//! Say command - repeats the arguments as the bot.

use crate::commands::CommandHandler;
use crate::context::CommandContext;
use crate::error::AppResult;
use async_trait::async_trait;
use discord_client::{OutgoingMessage, SentMessage};
use tracing::warn;

pub struct SayCommand;

impl SayCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SayCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for SayCommand {
    fn name(&self) -> &str {
        "say"
    }

    fn description(&self) -> &str {
        "Says a message"
    }

    fn usage(&self) -> &str {
        "<message...>"
    }

    fn level(&self) -> Option<u32> {
        Some(5)
    }

    async fn exec(&self, ctx: &CommandContext) -> AppResult<SentMessage> {
        // The invocation is removed so only the bot's message remains.
        if let Err(e) = ctx.bot.delete_message(ctx.msg.channel_id, ctx.msg.id).await {
            warn!("Failed to delete say invocation {}: {}", ctx.msg.id, e);
        }

        let message = OutgoingMessage {
            content: Some(ctx.args.join(" ")),
            message_reference: Some(None),
            ..Default::default()
        };

        Ok(ctx.reply(message).await?)
    }
}
