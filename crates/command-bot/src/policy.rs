//! Privilege gating of command execution.

use crate::commands::CommandHandler;
use crate::config::Config;
use discord_client::UserId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Who is invoking a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invoker {
    pub user_id: UserId,
    pub level: u32,
}

/// Decides whether an invoker may run a command.
pub trait PrivilegePolicy: Send + Sync {
    fn permits(&self, command: &dyn CommandHandler, invoker: &Invoker) -> bool;
}

/// Every command runs regardless of its level.
#[derive(Debug, Default)]
pub struct Unenforced;

impl PrivilegePolicy for Unenforced {
    fn permits(&self, _command: &dyn CommandHandler, _invoker: &Invoker) -> bool {
        true
    }
}

/// Commands with a level run only for invokers at or above it.
/// Configured admin users pass every check.
#[derive(Debug, Default)]
pub struct MinimumLevel {
    admins: HashSet<UserId>,
}

impl MinimumLevel {
    pub fn new(admins: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }
}

impl PrivilegePolicy for MinimumLevel {
    fn permits(&self, command: &dyn CommandHandler, invoker: &Invoker) -> bool {
        match command.level() {
            None => true,
            Some(required) => invoker.level >= required || self.admins.contains(&invoker.user_id),
        }
    }
}

/// Policy selected by `enforce_levels`.
pub fn from_config(config: &Config) -> Arc<dyn PrivilegePolicy> {
    if !config.enforce_levels {
        return Arc::new(Unenforced);
    }

    let admins = config
        .admin_ids
        .iter()
        .filter_map(|(label, id)| match id.parse::<UserId>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring admin id '{}' for {}: not a snowflake", id, label);
                None
            }
        })
        .collect::<Vec<_>>();

    Arc::new(MinimumLevel::new(admins))
}
