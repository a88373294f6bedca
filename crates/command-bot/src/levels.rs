//! Admin level resolution from member roles.

use crate::config::Config;
use discord_client::{Member, RoleId};
use std::collections::HashMap;

/// Highest level configured for any of `roles`, or 0.
///
/// Unmapped roles are ignored. The result does not depend on role order.
pub fn admin_level(levels: &HashMap<String, u32>, roles: &[RoleId]) -> u32 {
    roles
        .iter()
        .filter_map(|role| levels.get(&role.to_string()))
        .copied()
        .max()
        .unwrap_or(0)
}

/// Admin level of a member under the configured role table.
///
/// Computed fresh on every call; nothing is cached. Members outside a guild
/// have no roles and resolve to 0.
pub fn resolve_level(config: &Config, member: Option<&Member>) -> u32 {
    member.map_or(0, |m| admin_level(&config.levels, &m.roles))
}
