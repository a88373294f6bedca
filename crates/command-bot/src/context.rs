//! Per-invocation command context.

use crate::config::Config;
use crate::levels::resolve_level;
use crate::platform::Platform;
use crate::registry::CommandRegistry;
use crate::reply::{assemble, normalize, resolve_target, ReplyInput};
use discord_client::{ChannelId, ChatError, InboundMessage, SentMessage};
use std::sync::Arc;
use tracing::debug;

/// Everything a command sees while it runs.
pub struct CommandContext {
    /// Positional arguments after the command name.
    pub args: Vec<String>,
    /// Platform handle for calls beyond `reply`.
    pub bot: Arc<dyn Platform>,
    /// The message that triggered the command.
    pub msg: InboundMessage,
    pub config: Arc<Config>,
    pub commands: Arc<CommandRegistry>,
}

impl CommandContext {
    /// Reply in the originating channel, referencing the triggering message.
    pub async fn reply(&self, content: impl Into<ReplyInput>) -> Result<SentMessage, ChatError> {
        self.send_reply(content.into(), None).await
    }

    /// Reply in another channel of the same guild, without a reference.
    pub async fn reply_in(
        &self,
        content: impl Into<ReplyInput>,
        channel: ChannelId,
    ) -> Result<SentMessage, ChatError> {
        self.send_reply(content.into(), Some(channel)).await
    }

    async fn send_reply(
        &self,
        content: ReplyInput,
        channel: Option<ChannelId>,
    ) -> Result<SentMessage, ChatError> {
        let payload = normalize(content);
        let target = resolve_target(self.bot.as_ref(), &self.msg, channel).await;
        let payload = assemble(&self.msg, payload, target.should_reference);

        let Some(destination) = target.channel else {
            return Err(ChatError::ChannelNotFound(
                channel.unwrap_or(self.msg.channel_id),
            ));
        };

        debug!("Replying to {} in channel {}", self.msg.id, destination.id);
        self.bot.send_message(destination.id, &payload).await
    }

    /// Admin level of the invoking member.
    pub fn admin_level(&self) -> u32 {
        resolve_level(&self.config, self.msg.member.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;
    use discord_client::{
        AllowedMentions, Channel, GuildId, Member, MessageId, MessageReference, OutgoingMessage,
        RoleId, User, UserId,
    };
    use serde_json::json;

    fn context(platform: MockPlatform) -> CommandContext {
        let config: Config = serde_json::from_value(json!({
            "token": "t",
            "levels": { "1": 2, "2": 7 }
        }))
        .unwrap();

        CommandContext {
            args: Vec::new(),
            bot: Arc::new(platform),
            msg: InboundMessage {
                id: MessageId(99),
                content: "!cmd".into(),
                author: User {
                    id: UserId(7),
                    name: "alice".into(),
                    bot: false,
                },
                member: Some(Member {
                    roles: vec![RoleId(2), RoleId(1)],
                }),
                channel_id: ChannelId(200),
                guild_id: Some(GuildId(10)),
            },
            config: Arc::new(config),
            commands: Arc::new(CommandRegistry::new()),
        }
    }

    fn sent(channel: ChannelId) -> SentMessage {
        SentMessage {
            id: MessageId(500),
            channel_id: channel,
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn test_reply_text_in_same_channel() {
        let mut platform = MockPlatform::new();
        platform.expect_guild_channels().never();
        platform
            .expect_send_message()
            .withf(|channel, message| {
                *channel == ChannelId(200)
                    && *message
                        == OutgoingMessage {
                            content: Some("hello".into()),
                            message_reference: Some(Some(MessageReference {
                                message_id: MessageId(99),
                            })),
                            allowed_mentions: Some(AllowedMentions {
                                replied_user: false,
                            }),
                            ..Default::default()
                        }
            })
            .times(1)
            .returning(|channel, _| Ok(sent(channel)));

        let ctx = context(platform);
        let reply = ctx.reply("hello").await.unwrap();
        assert_eq!(reply.channel_id, ChannelId(200));
    }

    #[tokio::test]
    async fn test_reply_object_is_dumped() {
        let mut platform = MockPlatform::new();
        platform
            .expect_send_message()
            .withf(|_, message| {
                message.content.as_deref() == Some("```json\n{\n    \"foo\": 1\n}\n```")
                    && message.message_reference.is_some()
            })
            .times(1)
            .returning(|channel, _| Ok(sent(channel)));

        let ctx = context(platform);
        ctx.reply(json!({ "foo": 1 })).await.unwrap();
    }

    #[tokio::test]
    async fn test_reply_in_other_channel() {
        let mut platform = MockPlatform::new();
        platform.expect_guild_channels().returning(|guild| {
            Ok(vec![Channel {
                id: ChannelId(201),
                kind: 0,
                guild_id: Some(guild),
                name: Some("logs".into()),
            }])
        });
        platform
            .expect_send_message()
            .withf(|channel, message| {
                *channel == ChannelId(201)
                    && message.message_reference.is_none()
                    && message.allowed_mentions == Some(AllowedMentions { replied_user: false })
            })
            .times(1)
            .returning(|channel, _| Ok(sent(channel)));

        let ctx = context(platform);
        let reply = ctx
            .reply_in(json!({ "content": "hi", "embeds": [{ "title": "e" }] }), ChannelId(201))
            .await
            .unwrap();
        assert_eq!(reply.channel_id, ChannelId(201));
    }

    #[tokio::test]
    async fn test_reply_to_unknown_channel_fails_at_send() {
        let mut platform = MockPlatform::new();
        platform.expect_guild_channels().returning(|_| Ok(Vec::new()));
        platform.expect_send_message().never();

        let ctx = context(platform);
        let result = ctx.reply_in("lost", ChannelId(404)).await;

        assert!(matches!(result, Err(ChatError::ChannelNotFound(ChannelId(404)))));
    }

    #[tokio::test]
    async fn test_send_failure_is_returned() {
        let mut platform = MockPlatform::new();
        platform
            .expect_send_message()
            .returning(|_, _| Err(ChatError::SendFailed("Missing Permissions".into())));

        let ctx = context(platform);
        assert!(matches!(
            ctx.reply("hi").await,
            Err(ChatError::SendFailed(_))
        ));
    }

    #[test]
    fn test_admin_level_uses_member_roles() {
        let ctx = context(MockPlatform::new());
        assert_eq!(ctx.admin_level(), 7);
    }
}
