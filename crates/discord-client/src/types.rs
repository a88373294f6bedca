//! Discord API types.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// First millisecond of 2015, the epoch Discord snowflakes count from.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

macro_rules! snowflake {
    ($($(#[$meta:meta])* $name:ident;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        // Discord sends snowflakes as strings so they survive JSON number precision.
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(SnowflakeVisitor).map(Self)
            }
        }
    )+};
}

snowflake! {
    /// Message snowflake.
    MessageId;
    /// Channel snowflake.
    ChannelId;
    /// Guild (server) snowflake.
    GuildId;
    /// User snowflake.
    UserId;
    /// Role snowflake.
    RoleId;
}

struct SnowflakeVisitor;

impl<'de> de::Visitor<'de> for SnowflakeVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a string or an unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl MessageId {
    /// Creation time encoded in the snowflake.
    pub fn created_at(self) -> DateTime<Utc> {
        let millis = (self.0 >> 22) + DISCORD_EPOCH_MS;
        Utc.timestamp_millis_opt(millis as i64)
            .single()
            .unwrap_or_default()
    }

    /// Build an id whose timestamp part is `time`.
    pub fn from_created_at(time: DateTime<Utc>) -> Self {
        let millis = (time.timestamp_millis() as u64).saturating_sub(DISCORD_EPOCH_MS);
        Self(millis << 22)
    }
}

/// A Discord user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "username")]
    pub name: String,
    #[serde(default)]
    pub bot: bool,
}

/// Guild-specific data of a message author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

/// Message received from the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub id: MessageId,
    pub content: String,
    pub author: User,
    /// Present only for guild messages.
    #[serde(default)]
    pub member: Option<Member>,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
}

impl InboundMessage {
    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.created_at()
    }

    /// Handle of the channel the message was posted in.
    pub fn channel(&self) -> Channel {
        Channel::from_id(self.channel_id, self.guild_id)
    }

    /// Roles of the author, empty outside guilds.
    pub fn roles(&self) -> &[RoleId] {
        match &self.member {
            Some(member) => &member.roles,
            None => &[],
        }
    }
}

/// A guild or DM channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Channel {
    /// Handle known only by id.
    pub fn from_id(id: ChannelId, guild_id: Option<GuildId>) -> Self {
        Self {
            id,
            kind: 0,
            guild_id,
            name: None,
        }
    }
}

/// Message created by a send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SentMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub content: String,
}

/// Outgoing message payload (`POST /channels/{id}/messages`).
///
/// Field names follow the REST API; the camelCase spellings are accepted as
/// aliases so payloads written in the gateway-library style deserialize too.
/// Unknown fields are kept in `extra` and sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,

    /// Uploaded as a multipart file, never part of the JSON body.
    #[serde(default, skip_serializing)]
    pub file: Option<Attachment>,

    /// `Some(None)` is an explicit null and suppresses the reply reference.
    #[serde(
        default,
        alias = "messageReference",
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_reference: Option<Option<MessageReference>>,

    #[serde(
        default,
        alias = "allowedMentions",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_mentions: Option<AllowedMentions>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutgoingMessage {
    /// Plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Build a payload from an arbitrary JSON object. Never rejects input.
    ///
    /// `content`, `embeds` and `file` are typed only when that loses nothing;
    /// any other shape stays verbatim in `extra` and reaches the platform as
    /// written. The addressing fields accept their camelCase spellings.
    pub fn from_object(object: Map<String, Value>) -> Self {
        let mut message = Self::default();

        for (key, value) in object {
            let typed = match key.as_str() {
                "content" => exact::<String>(&value).map(|c| message.content = Some(c)),
                "embeds" => exact::<Vec<Embed>>(&value).map(|e| message.embeds = Some(e)),
                "file" => exact::<Attachment>(&value).map(|f| message.file = Some(f)),
                "message_reference" | "messageReference" => {
                    reference(&value).map(|r| message.message_reference = Some(r))
                }
                "allowed_mentions" | "allowedMentions" => {
                    serde_json::from_value::<AllowedMentions>(value.clone())
                        .ok()
                        .map(|m| message.allowed_mentions = Some(m))
                }
                _ => None,
            };

            if typed.is_none() {
                message.extra.insert(key, value);
            }
        }

        message
    }
}

/// `value` as `T`, if `T` serializes back to exactly the same JSON.
fn exact<T: DeserializeOwned + Serialize>(value: &Value) -> Option<T> {
    let typed: T = serde_json::from_value(value.clone()).ok()?;
    (serde_json::to_value(&typed).ok()? == *value).then_some(typed)
}

fn reference(value: &Value) -> Option<Option<MessageReference>> {
    if value.is_null() {
        return Some(None);
    }
    serde_json::from_value(value.clone()).ok().map(Some)
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReference {
    #[serde(alias = "messageId", alias = "messageID")]
    pub message_id: MessageId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedMentions {
    #[serde(default, alias = "repliedUser")]
    pub replied_user: bool,
}

/// Rich embed. Only the common fields are typed; the rest pass through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// File upload. `data` is base64 in JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(with = "base64_data")]
    pub data: Vec<u8>,
}

mod base64_data {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(de::Error::custom)
    }
}
