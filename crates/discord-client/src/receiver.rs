//! Gateway receiver that turns message events into a stream.

use crate::error::ChatError;
use crate::types::*;
use secrecy::{ExposeSecret, SecretString};
use serenity::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::GatewayIntents;
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tracing::{debug, error, info};

/// Message receiver backed by a gateway connection.
pub struct MessageReceiver {
    token: SecretString,
}

impl MessageReceiver {
    /// Create a new message receiver.
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }

    fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Connect and receive messages as an async stream.
    ///
    /// The gateway runs on its own task; the stream ends when it shuts down.
    pub async fn stream(self) -> Result<impl Stream<Item = InboundMessage>, ChatError> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut client = Client::builder(self.token.expose_secret(), Self::intents())
            .event_handler(Forwarder { tx })
            .await
            .map_err(|e| ChatError::Gateway(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = client.start().await {
                error!("Gateway connection ended: {}", e);
            }
        });

        Ok(async_stream::stream! {
            while let Some(message) = rx.recv().await {
                yield message;
            }
        })
    }
}

struct Forwarder {
    tx: mpsc::UnboundedSender<InboundMessage>,
}

#[async_trait]
impl EventHandler for Forwarder {
    async fn ready(&self, _: Context, ready: Ready) {
        info!(
            "Gateway ready as {} in {} guilds",
            ready.user.name,
            ready.guilds.len()
        );
    }

    async fn message(&self, _: Context, msg: Message) {
        let inbound = to_inbound(&msg);
        debug!(
            "Received: {} from {}",
            inbound.content.chars().take(50).collect::<String>(),
            inbound.author.name
        );
        if self.tx.send(inbound).is_err() {
            debug!("Message stream closed, dropping event");
        }
    }
}

fn to_inbound(msg: &Message) -> InboundMessage {
    InboundMessage {
        id: MessageId(msg.id.0),
        content: msg.content.clone(),
        author: User {
            id: UserId(msg.author.id.0),
            name: msg.author.name.clone(),
            bot: msg.author.bot,
        },
        member: msg.member.as_ref().map(|m| Member {
            roles: m.roles.iter().map(|r| RoleId(r.0)).collect(),
        }),
        channel_id: ChannelId(msg.channel_id.0),
        guild_id: msg.guild_id.map(|g| GuildId(g.0)),
    }
}
