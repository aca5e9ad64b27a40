use std::collections::HashMap;

use serenity::all::{CommandId, GuildId, Permissions};

use super::{Argument, CommandChecks, Cooldown, Localizations, localized};

/// What kind of application command a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Slash,
    /// A leaf sub-command expanded from a slash command's option tree.
    SubCommand,
    User,
    Message,
}

impl CommandKind {
    /// Whether Discord renders this command as a clickable mention.
    pub fn is_mentionable(self) -> bool {
        matches!(self, Self::Slash | Self::SubCommand)
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Slash => "Slash Command",
            Self::SubCommand => "Slash Sub-Command",
            Self::User => "User Command",
            Self::Message => "Message Command",
        };
        f.write_str(name)
    }
}

/// Link from a sub-command record back to its top-level parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub id: CommandId,
    pub name: String,
}

/// One registered application command, with every attribute a help surface
/// needs gathered in one place.
///
/// Records are produced by [`CommandIndex`](crate::CommandIndex) from the
/// descriptors Discord returns at registration time, merged with the
/// author-declared [`CommandMeta`](crate::CommandMeta). Sub-commands get a
/// record each, sharing the parent's id.
#[derive(Debug, Clone, PartialEq)]
pub struct AppCommand {
    pub id: CommandId,
    pub kind: CommandKind,
    /// Qualified name, space-joined for sub-commands ("config alias add").
    /// Localized copies carry the translated name here.
    pub name: String,
    /// The non-localized qualified name; stays stable across `localize` so
    /// mentions keep working.
    pub canonical_name: String,
    pub description: String,
    pub args: Vec<Argument>,
    pub checks: CommandChecks,
    pub cooldown: Option<Cooldown>,
    /// Category the author grouped the command under, or empty.
    pub category: String,
    /// `None` for global commands.
    pub guild_id: Option<GuildId>,
    pub default_member_permissions: Option<Permissions>,
    pub dm_permission: bool,
    pub nsfw: bool,
    pub name_localizations: Option<Localizations>,
    pub description_localizations: Option<Localizations>,
    /// Arbitrary author-provided metadata.
    pub extras: HashMap<String, String>,
    /// Set on sub-command records only.
    pub parent: Option<ParentRef>,
}

impl AppCommand {
    /// The clickable `</name:id>` mention for slash and sub-commands, or the
    /// bolded name for context menu commands (which cannot be mentioned).
    pub fn mention(&self) -> String {
        if self.kind.is_mentionable() {
            format!("</{}:{}>", self.canonical_name, self.id)
        } else {
            format!("**{}**", self.canonical_name)
        }
    }

    /// The localized name for `locale`, or the plain name if no translation
    /// exists.
    pub fn localized_name(&self, locale: &str) -> &str {
        localized(self.name_localizations.as_ref(), locale, &self.name)
    }

    /// The localized description for `locale`, falling back to the plain
    /// description.
    pub fn localized_description(&self, locale: &str) -> &str {
        localized(
            self.description_localizations.as_ref(),
            locale,
            &self.description,
        )
    }

    /// A copy of this record with name, description and arguments swapped for
    /// the `locale` translations. `canonical_name` is left untouched.
    pub fn localize(&self, locale: &str) -> Self {
        Self {
            name: self.localized_name(locale).to_owned(),
            description: self.localized_description(locale).to_owned(),
            args: self.args.iter().map(|arg| arg.localize(locale)).collect(),
            ..self.clone()
        }
    }

    /// Whether this is one of the leaf records expanded from a slash
    /// command's sub-command tree.
    pub fn is_sub_command(&self) -> bool {
        self.parent.is_some()
    }
}
