//! Help command - displays available commands.

use crate::commands::CommandHandler;
use crate::context::CommandContext;
use crate::error::AppResult;
use async_trait::async_trait;
use discord_client::{Embed, EmbedField, OutgoingMessage, SentMessage};

pub struct HelpCommand;

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

fn synopsis(prefix: &str, command: &dyn CommandHandler) -> String {
    format!("`{}{} {}`", prefix, command.name(), command.usage())
}

/// One field per category listing its commands.
fn overview(ctx: &CommandContext) -> Embed {
    let mut fields: Vec<EmbedField> = Vec::new();

    for command in ctx.commands.list() {
        let line = format!(
            "{} - {}",
            synopsis(&ctx.config.prefix, command.as_ref()),
            command.description()
        );
        match fields.last_mut() {
            Some(field) if field.name == command.category() => {
                field.value.push('\n');
                field.value.push_str(&line);
            }
            _ => fields.push(EmbedField {
                name: command.category().to_string(),
                value: line,
                inline: false,
            }),
        }
    }

    Embed {
        title: Some("Commands".into()),
        fields,
        ..Default::default()
    }
}

fn details(ctx: &CommandContext, command: &dyn CommandHandler) -> Embed {
    let mut description = format!(
        "{}\n{}",
        synopsis(&ctx.config.prefix, command),
        command.description()
    );
    if let Some(level) = command.level() {
        description.push_str(&format!("\nRequires level {}", level));
    }

    Embed {
        title: Some(command.name().to_string()),
        description: Some(description),
        ..Default::default()
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Lists commands, or describes one"
    }

    fn usage(&self) -> &str {
        "[command]"
    }

    async fn exec(&self, ctx: &CommandContext) -> AppResult<SentMessage> {
        let embed = match ctx.args.first().filter(|name| !name.is_empty()) {
            None => overview(ctx),
            Some(name) => match ctx.commands.get(name) {
                Some(command) => details(ctx, command.as_ref()),
                None => {
                    return Ok(ctx
                        .reply(format!("Unknown command `{}`", name))
                        .await?)
                }
            },
        };

        let message = OutgoingMessage {
            embeds: Some(vec![embed]),
            ..Default::default()
        };

        Ok(ctx.reply(message).await?)
    }
}
