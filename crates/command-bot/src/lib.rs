//! Prefix-command bot for Discord.
//!
//! Inbound messages are matched against a command prefix, routed to a
//! registered handler, and handler replies are normalized into message
//! payloads addressed back at the originating message.

pub mod commands;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod levels;
pub mod platform;
pub mod policy;
pub mod registry;
pub mod reply;

pub use config::Config;
pub use context::CommandContext;
pub use dispatcher::{parse_invocation, Dispatch, Dispatcher};
pub use error::{AppError, AppResult};
pub use platform::Platform;
pub use registry::CommandRegistry;
