//! Author-declared command metadata.
//!
//! The descriptors Discord returns for registered commands carry no
//! cooldowns, permission checks or categories; those live in the bot's own
//! code. Bots declare them here, keyed by qualified command name, either in
//! code or in a TOML file:
//!
//! ```toml
//! [commands.ban]
//! category = "Moderation"
//! permissions = "4"
//! roles = ["Moderator"]
//! cooldown = { rate = 2, per = 60.0, bucket = "user" }
//!
//! [commands."config set"]
//! help = "Set a configuration value for this server."
//! ```

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};
use serenity::all::Permissions;

use crate::types::{Cooldown, RoleRequirement};

/// Metadata a bot author attaches to one command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CommandMeta {
    /// Long help text; overrides the registered description when set.
    pub help: Option<String>,
    /// Category the command is grouped under.
    pub category: Option<String>,
    /// Permissions checked by the command body, as a permission bitset.
    pub permissions: Permissions,
    /// Roles checked by the command body, by id or name.
    pub roles: Vec<RoleRequirement>,
    pub cooldown: Option<Cooldown>,
    /// Free-form key/value metadata.
    pub extras: HashMap<String, String>,
}

impl Default for CommandMeta {
    fn default() -> Self {
        Self {
            help: None,
            category: None,
            permissions: Permissions::empty(),
            roles: Vec::new(),
            cooldown: None,
            extras: HashMap::new(),
        }
    }
}

/// Qualified command name to [`CommandMeta`].
///
/// Entries for names that never show up among the registered commands are
/// ignored; commands without an entry get default metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MetaRegistry {
    pub commands: HashMap<String, CommandMeta>,
}

impl MetaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a registry from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Registers metadata for the command with the given qualified name,
    /// replacing any existing entry.
    pub fn insert(&mut self, name: impl Into<String>, meta: CommandMeta) -> &mut Self {
        self.commands.insert(name.into(), meta);
        self
    }

    /// Chainable variant of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, meta: CommandMeta) -> Self {
        self.commands.insert(name.into(), meta);
        self
    }

    pub fn get(&self, qualified_name: &str) -> Option<&CommandMeta> {
        self.commands.get(qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CooldownBucket;
    use serenity::all::RoleId;

    #[test]
    fn parses_registry_from_toml() {
        let registry: MetaRegistry = toml::from_str(
            r#"
            [commands.ban]
            category = "Moderation"
            permissions = "4"
            roles = ["123", "Moderator"]
            cooldown = { rate = 2, per = 60.0, bucket = "user" }

            [commands."config set"]
            help = "Set a configuration value."
            extras = { plugin = "Admin" }
            "#,
        )
        .unwrap();

        let ban = registry.get("ban").unwrap();
        assert_eq!(ban.category.as_deref(), Some("Moderation"));
        assert_eq!(ban.permissions, Permissions::BAN_MEMBERS);
        assert_eq!(
            ban.roles,
            vec![
                RoleRequirement::Id(RoleId::new(123)),
                RoleRequirement::Name("Moderator".into()),
            ]
        );
        assert_eq!(
            ban.cooldown,
            Some(Cooldown {
                rate: 2,
                per: 60.0,
                bucket: CooldownBucket::User,
            })
        );

        let sub = registry.get("config set").unwrap();
        assert_eq!(sub.help.as_deref(), Some("Set a configuration value."));
        assert_eq!(sub.extras.get("plugin").map(String::as_str), Some("Admin"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn missing_fields_default() {
        let registry: MetaRegistry =
            toml::from_str("[commands.ping]\ncategory = \"General\"").unwrap();
        let ping = registry.get("ping").unwrap();
        assert!(ping.permissions.is_empty());
        assert!(ping.roles.is_empty());
        assert!(ping.cooldown.is_none());
        assert!(ping.help.is_none());
    }
}
