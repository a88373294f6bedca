//! Command bot - main entry point.

use anyhow::Context;
use command_bot::commands::builtin_registry;
use command_bot::{AppResult, Config, Dispatcher, Platform};
use discord_client::{DiscordClient, MessageReceiver};
use std::sync::Arc;
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Arc::new(Config::load().context("Failed to load configuration")?);

    // Initialize logging
    init_logging(&config.log_level);

    info!("Starting command bot...");

    let client = DiscordClient::new(
        config.api_base_url.as_str(),
        config.token.clone(),
        config.request_timeout,
    )?;

    let me = match client.current_user().await {
        Ok(user) => user,
        Err(e) => {
            error!("Discord API rejected the bot token: {}", e);
            return Err(e.into());
        }
    };
    info!("Authenticated as {} ({})", me.name, me.id);

    let commands = Arc::new(builtin_registry());
    info!("Registered {} commands", commands.len());

    if config.enforce_levels {
        info!("Command levels enforced ({} mapped roles)", config.levels.len());
    }

    let platform: Arc<dyn Platform> = Arc::new(client);
    let dispatcher = Dispatcher::new(platform, commands, config.clone()).with_bot_user(me.id);

    let receiver = MessageReceiver::new(config.token.clone());
    let mut stream = Box::pin(receiver.stream().await?);

    info!("Listening for messages with prefix '{}'", config.prefix);

    // Main message loop
    loop {
        tokio::select! {
            next = stream.next() => match next {
                Some(message) => {
                    let dispatcher = dispatcher.clone();
                    tokio::spawn(async move {
                        dispatcher.dispatch(message).await;
                    });
                }
                None => {
                    warn!("Gateway stream ended");
                    break;
                }
            },
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
