//! Discord REST client.

use crate::error::ChatError;
use crate::types::*;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Discord REST API client authenticated as a bot.
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl DiscordClient {
    /// Create a new Discord client.
    pub fn new(
        base_url: impl Into<String>,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(
            AUTHORIZATION,
            format!("Bot {}", self.token.expose_secret()),
        )
    }

    /// Check that the token is accepted by the API.
    pub async fn health_check(&self) -> bool {
        self.current_user().await.is_ok()
    }

    /// Get the bot's own user.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ChatError> {
        let response = self.get("/users/@me").send().await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(msg));
        }

        Ok(response.json().await?)
    }

    /// List the channels of a guild.
    #[instrument(skip(self))]
    pub async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<Channel>, ChatError> {
        let response = self
            .get(&format!("/guilds/{}/channels", guild_id))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(msg));
        }

        let channels: Vec<Channel> = response.json().await?;
        debug!("Guild {} has {} channels", guild_id, channels.len());
        Ok(channels)
    }

    /// Send a message to a channel.
    #[instrument(skip(self, message))]
    pub async fn send_message(
        &self,
        channel_id: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<SentMessage, ChatError> {
        let request = self.authorized(self.client.post(format!(
            "{}/channels/{}/messages",
            self.base_url, channel_id
        )));

        let request = match &message.file {
            Some(file) => {
                let form = Form::new()
                    .text("payload_json", serde_json::to_string(message)?)
                    .part(
                        "files[0]",
                        Part::bytes(file.data.clone()).file_name(file.name.clone()),
                    );
                request.multipart(form)
            }
            None => request.json(message),
        };

        let response = request.send().await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {}", msg);
            return Err(ChatError::SendFailed(msg));
        }

        let sent: SentMessage = response.json().await?;
        debug!("Sent message {} to channel {}", sent.id, channel_id);
        Ok(sent)
    }

    /// Delete a message.
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), ChatError> {
        let response = self
            .authorized(self.client.delete(format!(
                "{}/channels/{}/messages/{}",
                self.base_url, channel_id, message_id
            )))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(msg));
        }

        Ok(())
    }
}
