//! Ping command - reports message latency.

use crate::commands::CommandHandler;
use crate::context::CommandContext;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::Utc;
use discord_client::{OutgoingMessage, SentMessage};

pub struct PingCommand;

impl PingCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PingCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Gets the latency of the bot in ms"
    }

    fn usage(&self) -> &str {
        "<None>"
    }

    fn category(&self) -> &str {
        "debug"
    }

    async fn exec(&self, ctx: &CommandContext) -> AppResult<SentMessage> {
        let latency = Utc::now()
            .signed_duration_since(ctx.msg.created_at())
            .num_milliseconds();

        Ok(ctx
            .reply(OutgoingMessage::text(format!("{} ms", latency)))
            .await?)
    }
}
