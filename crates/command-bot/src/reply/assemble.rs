//! Adding reply addressing to a normalized payload.

use discord_client::{AllowedMentions, InboundMessage, MessageReference, OutgoingMessage};

/// Addressing defaults for a reply to `message`.
///
/// Replies never ping the replied-to author. In the originating channel they
/// also reference the original message.
pub fn reply_metadata(message: &InboundMessage, should_reference: bool) -> OutgoingMessage {
    OutgoingMessage {
        message_reference: should_reference.then(|| {
            Some(MessageReference {
                message_id: message.id,
            })
        }),
        allowed_mentions: Some(AllowedMentions {
            replied_user: false,
        }),
        ..Default::default()
    }
}

/// Final payload: reply metadata with `payload` laid over it.
///
/// Every field present in `payload` wins, including an explicit null
/// message reference; metadata only fills the gaps.
pub fn assemble(
    message: &InboundMessage,
    payload: OutgoingMessage,
    should_reference: bool,
) -> OutgoingMessage {
    overlay(reply_metadata(message, should_reference), payload)
}

fn overlay(base: OutgoingMessage, top: OutgoingMessage) -> OutgoingMessage {
    let mut extra = base.extra;
    extra.extend(top.extra);

    OutgoingMessage {
        content: top.content.or(base.content),
        embeds: top.embeds.or(base.embeds),
        file: top.file.or(base.file),
        message_reference: top.message_reference.or(base.message_reference),
        allowed_mentions: top.allowed_mentions.or(base.allowed_mentions),
        extra,
    }
}
