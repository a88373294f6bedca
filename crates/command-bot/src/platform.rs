//! The chat platform as seen by the dispatcher and commands.

use async_trait::async_trait;
use discord_client::{
    Channel, ChannelId, ChatError, DiscordClient, GuildId, MessageId, OutgoingMessage,
    SentMessage,
};

/// Outbound operations the bot needs from the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Platform: Send + Sync {
    /// Channels of a guild, used to resolve channel overrides.
    async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<Channel>, ChatError>;

    /// Send a fully assembled message.
    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<SentMessage, ChatError>;

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), ChatError>;
}

#[async_trait]
impl Platform for DiscordClient {
    async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<Channel>, ChatError> {
        DiscordClient::guild_channels(self, guild_id).await
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<SentMessage, ChatError> {
        DiscordClient::send_message(self, channel_id, message).await
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), ChatError> {
        DiscordClient::delete_message(self, channel_id, message_id).await
    }
}
