//! Discord client errors.

use crate::types::ChannelId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("Gateway error: {0}")]
    Gateway(String),
}
