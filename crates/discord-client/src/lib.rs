//! Discord platform client: REST calls and the gateway message stream.

mod client;
mod error;
mod receiver;
mod types;

pub use client::DiscordClient;
pub use error::ChatError;
pub use receiver::MessageReceiver;
pub use types::*;
