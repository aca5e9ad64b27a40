//! The command cache: normalized records built once from the registered
//! commands, plus the query surface over them.

use std::collections::{BTreeSet, HashMap, HashSet};

use serenity::all::{Command, CommandId, GuildId, Http, Permissions};
use tracing::debug;

use crate::{
    meta::MetaRegistry,
    types::{AppCommand, CommandKind},
};

mod walk;

/// Narrows the records returned by [`CommandIndex::filtered`].
#[derive(Debug, Default, Clone)]
pub struct CommandFilter<'a> {
    guild_id: Option<GuildId>,
    permissions: Option<Permissions>,
    include_nsfw: bool,
    dm_only: bool,
    category: Option<&'a str>,
    locale: Option<&'a str>,
}

impl<'a> CommandFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep global commands and commands registered to this guild.
    pub fn guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Drop commands whose default member permissions are not contained in
    /// `permissions` (the invoker's permission set).
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// NSFW commands are excluded unless this is set.
    pub fn include_nsfw(mut self) -> Self {
        self.include_nsfw = true;
        self
    }

    /// Keep only commands that can run in DMs.
    pub fn dm_only(mut self) -> Self {
        self.dm_only = true;
        self
    }

    /// Keep only commands in this category (case-insensitive).
    pub fn category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    /// Localize the returned records for this locale.
    pub fn locale(mut self, locale: &'a str) -> Self {
        self.locale = Some(locale);
        self
    }
}

/// All of a bot's registered application commands, normalized and indexed by
/// id and qualified name.
///
/// The index is a snapshot: it mirrors what was registered when it was built
/// and is not kept in sync with later (re)registrations. Build it once after
/// command registration, typically in the `ready` handler, and share it.
#[derive(Debug, Default, Clone)]
pub struct CommandIndex {
    commands: Vec<AppCommand>,
    by_id: HashMap<CommandId, usize>,
    by_name: HashMap<String, Vec<usize>>,
}

impl CommandIndex {
    /// Builds an index from descriptors already in hand. Commands named in
    /// `ignore` are left out.
    pub fn build(commands: &[Command], registry: &MetaRegistry, ignore: &[&str]) -> Self {
        let ignore: HashSet<&str> = ignore.iter().copied().collect();
        Self::from_records(walk::walk(commands, registry, &ignore))
    }

    /// Fetches the bot's global commands plus each listed guild's commands
    /// from the API and builds an index over all of them.
    pub async fn fetch(
        http: &Http,
        guilds: &[GuildId],
        registry: &MetaRegistry,
        ignore: &[&str],
    ) -> crate::Result<Self> {
        let mut commands = Command::get_global_commands(http).await?;
        for guild_id in guilds {
            commands.extend(guild_id.get_commands(http).await?);
        }
        debug!(count = commands.len(), "fetched registered application commands");

        Ok(Self::build(&commands, registry, ignore))
    }

    fn from_records(records: Vec<AppCommand>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            // Sub-commands share the parent's id; the first record wins.
            by_id.entry(record.id).or_insert(position);
            by_name
                .entry(record.canonical_name.clone())
                .or_default()
                .push(position);
        }

        Self {
            commands: records,
            by_id,
            by_name,
        }
    }

    /// Every record, in walk order.
    pub fn commands(&self) -> &[AppCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The first record with this id. Sub-commands share their parent's id,
    /// so prefer [`get_named`](Self::get_named) when leaves matter.
    pub fn get(&self, id: CommandId) -> Option<&AppCommand> {
        self.by_id.get(&id).map(|&position| &self.commands[position])
    }

    /// Looks a command up by qualified name, optionally constrained to one
    /// kind (a user command and a slash command may share a name).
    ///
    /// With a locale, the provided name may be the *localized* name (the
    /// shape autocomplete hands back) and the returned record is localized.
    pub fn get_named(
        &self,
        name: &str,
        kind: Option<CommandKind>,
        locale: Option<&str>,
    ) -> Option<AppCommand> {
        let matches_kind = |record: &AppCommand| kind.is_none_or(|kind| record.kind == kind);

        if let Some(locale) = locale {
            return self
                .commands
                .iter()
                .find(|&record| {
                    matches_kind(record)
                        && (record.localized_name(locale) == name || record.canonical_name == name)
                })
                .map(|record| record.localize(locale));
        }

        self.by_name
            .get(name)?
            .iter()
            .map(|&position| &self.commands[position])
            .find(|&record| matches_kind(record))
            .cloned()
    }

    /// Records that pass `filter`, de-duplicated by name and kind (a command
    /// registered in several guilds yields one record).
    pub fn filtered(&self, filter: &CommandFilter<'_>) -> Vec<AppCommand> {
        let mut seen: HashSet<(&str, CommandKind)> = HashSet::new();
        let mut out = Vec::new();

        for command in &self.commands {
            if let Some(guild_id) = filter.guild_id
                && command.guild_id.is_some_and(|registered| registered != guild_id)
            {
                continue;
            }
            if filter.dm_only && !command.dm_permission {
                continue;
            }
            if let Some(permissions) = filter.permissions
                && command
                    .default_member_permissions
                    .is_some_and(|required| !permissions.contains(required))
            {
                continue;
            }
            if !filter.include_nsfw && command.nsfw {
                continue;
            }
            if let Some(category) = filter.category
                && !command.category.eq_ignore_ascii_case(category)
            {
                continue;
            }
            if !seen.insert((command.canonical_name.as_str(), command.kind)) {
                continue;
            }

            out.push(match filter.locale {
                Some(locale) => command.localize(locale),
                None => command.clone(),
            });
        }

        out
    }

    /// Global commands plus the ones registered to `guild_id`.
    pub fn guild_commands(&self, guild_id: GuildId) -> Vec<AppCommand> {
        self.filtered(&CommandFilter::new().guild(guild_id))
    }

    /// Commands that can run in DMs.
    pub fn dm_only_commands(&self) -> Vec<AppCommand> {
        self.filtered(&CommandFilter::new().dm_only())
    }

    /// Sorted, de-duplicated category names. Commands without a category are
    /// not represented.
    pub fn categories(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|command| command.category.as_str())
            .filter(|category| !category.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Records grouped under `category` (case-insensitive).
    pub fn category_commands(&self, category: &str) -> Vec<&AppCommand> {
        self.commands
            .iter()
            .filter(|command| command.category.eq_ignore_ascii_case(category))
            .collect()
    }
}
