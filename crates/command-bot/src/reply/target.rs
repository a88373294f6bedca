//! Choosing the channel a reply goes to.

use crate::platform::Platform;
use discord_client::{Channel, ChannelId, InboundMessage};
use tracing::{debug, warn};

/// Where a reply is sent and whether it threads onto the original message.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDecision {
    /// `None` when a channel override did not resolve.
    pub channel: Option<Channel>,
    /// True only when no override was given.
    pub should_reference: bool,
}

/// Resolve the reply target for `message`.
///
/// Without an override the reply goes to the originating channel and
/// references the message. An override is looked up among the channels of
/// the originating guild and never references the message, even when it
/// names the originating channel.
pub async fn resolve_target(
    platform: &dyn Platform,
    message: &InboundMessage,
    explicit: Option<ChannelId>,
) -> TargetDecision {
    let Some(channel_id) = explicit else {
        return TargetDecision {
            channel: Some(message.channel()),
            should_reference: true,
        };
    };

    let channel = match message.guild_id {
        Some(guild_id) => match platform.guild_channels(guild_id).await {
            Ok(channels) => channels.into_iter().find(|c| c.id == channel_id),
            Err(e) => {
                warn!("Failed to list channels of guild {}: {}", guild_id, e);
                None
            }
        },
        None => None,
    };

    if channel.is_none() {
        debug!("Channel {} not found for message {}", channel_id, message.id);
    }

    TargetDecision {
        channel,
        should_reference: false,
    }
}
