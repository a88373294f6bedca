//! Common test utilities for integration tests.

use command_bot::commands::builtin_registry;
use command_bot::{Config, Dispatcher, Platform};
use discord_client::{
    ChannelId, DiscordClient, GuildId, InboundMessage, Member, MessageId, RoleId, User, UserId,
};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Create a Discord client configured for a mock server.
pub fn test_discord_client(mock_server: &MockServer) -> DiscordClient {
    DiscordClient::new(
        mock_server.uri(),
        SecretString::new("test-token".into()),
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Configuration with prefix `!`, role 500 at level 5 and role 700 at level 7.
pub fn test_config(extra: serde_json::Value) -> Arc<Config> {
    let mut config = serde_json::json!({
        "token": "test-token",
        "prefix": "!",
        "levels": { "500": 5, "700": 7 }
    });
    if let (Some(config), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        config.extend(extra.clone());
    }
    Arc::new(serde_json::from_value(config).unwrap())
}

/// Dispatcher with the built-in commands talking to a mock server.
pub fn test_dispatcher(mock_server: &MockServer, config: Arc<Config>) -> Dispatcher {
    let platform: Arc<dyn Platform> = Arc::new(test_discord_client(mock_server));
    Dispatcher::new(platform, Arc::new(builtin_registry()), config).with_bot_user(UserId(42))
}

/// Guild message 99 in channel 200 of guild 10 from user 7.
pub fn guild_message(content: &str, roles: &[u64]) -> InboundMessage {
    InboundMessage {
        id: MessageId(99),
        content: content.to_string(),
        author: User {
            id: UserId(7),
            name: "alice".into(),
            bot: false,
        },
        member: Some(Member {
            roles: roles.iter().copied().map(RoleId).collect(),
        }),
        channel_id: ChannelId(200),
        guild_id: Some(GuildId(10)),
    }
}

/// Body of a created message.
pub fn sent_message(id: &str, channel: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "channel_id": channel,
        "content": ""
    })
}
