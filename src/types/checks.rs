use serde::{Deserialize, Serialize};
use serenity::all::{Permissions, RoleId};

/// A role a command requires, declared either by id or by name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoleRequirement {
    Id(RoleId),
    Name(String),
}

impl std::fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// The permission and role requirements declared for a command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CommandChecks {
    pub permissions: Permissions,
    pub roles: Vec<RoleRequirement>,
}

impl Default for CommandChecks {
    fn default() -> Self {
        Self {
            permissions: Permissions::empty(),
            roles: Vec::new(),
        }
    }
}

impl CommandChecks {
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }

    /// Human-readable names of the required permissions.
    pub fn permission_names(&self) -> Vec<&'static str> {
        self.permissions.get_permission_names()
    }
}

/// The scope a cooldown is tracked against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CooldownBucket {
    #[default]
    Global,
    User,
    Guild,
    Channel,
    Member,
    Category,
    Role,
}

impl std::fmt::Display for CooldownBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Global => "Global",
            Self::User => "User",
            Self::Guild => "Guild",
            Self::Channel => "Channel",
            Self::Member => "Member",
            Self::Category => "Category",
            Self::Role => "Role",
        };
        f.write_str(name)
    }
}

/// A command's rate limit: `rate` uses every `per` seconds, tracked per
/// `bucket`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Cooldown {
    pub rate: u32,
    pub per: f64,
    pub bucket: CooldownBucket,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self {
            rate: 1,
            per: 0.0,
            bucket: CooldownBucket::Global,
        }
    }
}

impl std::fmt::Display for Cooldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let uses = if self.rate == 1 { "use" } else { "uses" };
        write!(
            f,
            "{} {uses} every {}s ({})",
            self.rate, self.per, self.bucket
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_display_pluralizes() {
        let once = Cooldown {
            rate: 1,
            per: 30.0,
            bucket: CooldownBucket::User,
        };
        assert_eq!(once.to_string(), "1 use every 30s (User)");

        let many = Cooldown {
            rate: 3,
            per: 60.0,
            bucket: CooldownBucket::Guild,
        };
        assert_eq!(many.to_string(), "3 uses every 60s (Guild)");
    }

    #[test]
    fn role_requirement_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            roles: Vec<RoleRequirement>,
        }

        let holder: Holder = toml::from_str(r#"roles = ["123", "Moderator"]"#).unwrap();
        assert_eq!(
            holder.roles,
            vec![
                RoleRequirement::Id(RoleId::new(123)),
                RoleRequirement::Name("Moderator".into()),
            ]
        );
    }

    #[test]
    fn permission_names_resolve() {
        let checks = CommandChecks {
            permissions: Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS,
            roles: vec![],
        };
        let names = checks.permission_names();
        assert!(names.contains(&"Ban Members"));
        assert!(names.contains(&"Kick Members"));
    }
}
