//! Routing of inbound messages to command handlers.

use crate::config::Config;
use crate::context::CommandContext;
use crate::levels::resolve_level;
use crate::platform::Platform;
use crate::policy::{self, Invoker, PrivilegePolicy};
use crate::registry::CommandRegistry;
use discord_client::{InboundMessage, UserId};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What the dispatcher did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Authored by a bot account.
    Ignored,
    /// A bare mention of the bot, answered with the prefix.
    Mention,
    /// Not a command invocation.
    NoPrefix,
    UnknownCommand(String),
    /// Refused by the privilege policy.
    Denied { command: String, level: u32 },
    /// The handler ran to completion (successfully or not).
    Invoked { command: String, args: Vec<String> },
}

/// Split a prefixed message into command name and arguments.
///
/// Splits on every single space, so consecutive spaces yield empty
/// arguments. Returns `None` when `content` does not start with `prefix`.
pub fn parse_invocation(prefix: &str, content: &str) -> Option<(String, Vec<String>)> {
    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split(' ').map(str::to_string);
    let name = tokens.next().unwrap_or_default();
    Some((name, tokens.collect()))
}

/// Message dispatcher. Cheap to clone; every clone shares the same registry.
#[derive(Clone)]
pub struct Dispatcher {
    platform: Arc<dyn Platform>,
    commands: Arc<CommandRegistry>,
    config: Arc<Config>,
    policy: Arc<dyn PrivilegePolicy>,
    bot_user: Option<UserId>,
}

impl Dispatcher {
    pub fn new(
        platform: Arc<dyn Platform>,
        commands: Arc<CommandRegistry>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            policy: policy::from_config(&config),
            platform,
            commands,
            config,
            bot_user: None,
        }
    }

    /// Replace the policy chosen from config.
    pub fn with_policy(mut self, policy: Arc<dyn PrivilegePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// The bot's own user, enabling mention acknowledgment.
    pub fn with_bot_user(mut self, bot_user: UserId) -> Self {
        self.bot_user = Some(bot_user);
        self
    }

    /// Handle one inbound message, running its command to completion.
    ///
    /// Unknown commands are dropped without a reply. Handler errors are
    /// logged and never reported to the user.
    pub async fn dispatch(&self, message: InboundMessage) -> Dispatch {
        if message.author.bot {
            return Dispatch::Ignored;
        }

        if self.is_bare_mention(&message.content) {
            self.acknowledge_mention(message).await;
            return Dispatch::Mention;
        }

        let Some((name, args)) = parse_invocation(&self.config.prefix, &message.content) else {
            return Dispatch::NoPrefix;
        };

        let Some(command) = self.commands.get(&name) else {
            debug!("Unknown command '{}' from {}", name, message.author.name);
            return Dispatch::UnknownCommand(name);
        };

        let invoker = Invoker {
            user_id: message.author.id,
            level: resolve_level(&self.config, message.member.as_ref()),
        };

        if !self.policy.permits(command.as_ref(), &invoker) {
            debug!(
                "Denied '{}' to {} (level {})",
                name, message.author.name, invoker.level
            );
            return Dispatch::Denied {
                command: name,
                level: invoker.level,
            };
        }

        info!("Running '{}' for {}", name, message.author.name);
        let ctx = self.context(message, args.clone());
        if let Err(e) = command.exec(&ctx).await {
            error!("Command '{}' failed: {}", name, e);
        }

        Dispatch::Invoked {
            command: name,
            args,
        }
    }

    fn context(&self, msg: InboundMessage, args: Vec<String>) -> CommandContext {
        CommandContext {
            args,
            bot: self.platform.clone(),
            msg,
            config: self.config.clone(),
            commands: self.commands.clone(),
        }
    }

    fn is_bare_mention(&self, content: &str) -> bool {
        let Some(bot) = self.bot_user else {
            return false;
        };
        let content = content.trim();
        content == format!("<@{}>", bot) || content == format!("<@!{}>", bot)
    }

    async fn acknowledge_mention(&self, message: InboundMessage) {
        let ctx = self.context(message, Vec::new());
        let text = format!("My prefix is `{}`", self.config.prefix);
        if let Err(e) = ctx.reply(text).await {
            warn!("Failed to acknowledge mention: {}", e);
        }
    }
}
