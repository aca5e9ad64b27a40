//! Turns the command descriptors Discord returns at registration time into
//! normalized [`AppCommand`] records.

use std::collections::HashSet;

use serenity::{
    all::{Command, CommandOption, CommandOptionType, CommandType},
    json::Value,
};
use tracing::{debug, warn};

use crate::{
    constant::extras as extras_keys,
    meta::{CommandMeta, MetaRegistry},
    types::{AppCommand, Argument, Choice, CommandChecks, CommandKind, Cooldown, ParentRef},
};

/// Normalizes every supported command in `commands`, skipping names listed in
/// `ignore`. Slash commands with sub-commands expand into one record per leaf.
pub(super) fn walk(
    commands: &[Command],
    registry: &MetaRegistry,
    ignore: &HashSet<&str>,
) -> Vec<AppCommand> {
    let default_meta = CommandMeta::default();
    let mut records = Vec::new();

    for command in commands {
        if ignore.contains(command.name.as_str()) {
            debug!(name = %command.name, "skipping ignored command");
            continue;
        }

        let meta = registry.get(&command.name).unwrap_or(&default_meta);
        match command.kind {
            CommandType::ChatInput => normalize_slash(command, meta, registry, &mut records),
            CommandType::User => records.push(normalize(command, CommandKind::User, meta)),
            CommandType::Message => records.push(normalize(command, CommandKind::Message, meta)),
            other => warn!(name = %command.name, kind = ?other, "skipping unsupported command type"),
        }
    }

    records
}

/// Normalizes a slash command. If its options are sub-commands or groups, the
/// parent itself produces no record and each leaf does instead.
fn normalize_slash(
    command: &Command,
    meta: &CommandMeta,
    registry: &MetaRegistry,
    records: &mut Vec<AppCommand>,
) {
    let has_sub_commands = command.options.iter().any(|option| {
        matches!(
            option.kind,
            CommandOptionType::SubCommand | CommandOptionType::SubCommandGroup
        )
    });

    if has_sub_commands {
        let parent = ParentRecord {
            command,
            checks: checks_of(meta),
            cooldown: meta.cooldown.clone(),
            category: category_of(meta),
        };
        expand_sub_commands(&parent, &command.options, &command.name, registry, records);
    } else {
        records.push(normalize(command, CommandKind::Slash, meta));
    }
}

/// Normalizes a command that maps 1:1 to a record: plain slash commands and
/// the context menu kinds.
fn normalize(command: &Command, kind: CommandKind, meta: &CommandMeta) -> AppCommand {
    AppCommand {
        id: command.id,
        kind,
        name: command.name.clone(),
        canonical_name: command.name.clone(),
        description: describe(meta, &command.description),
        args: collect_args(&command.options),
        checks: checks_of(meta),
        cooldown: meta.cooldown.clone(),
        category: category_of(meta),
        guild_id: command.guild_id,
        default_member_permissions: command.default_member_permissions,
        dm_permission: dm_permission_of(command),
        nsfw: command.nsfw,
        name_localizations: command.name_localizations.clone(),
        description_localizations: command.description_localizations.clone(),
        extras: meta.extras.clone(),
        parent: None,
    }
}

/// Attributes a sub-command inherits from the top-level command it belongs to.
struct ParentRecord<'a> {
    command: &'a Command,
    checks: CommandChecks,
    cooldown: Option<Cooldown>,
    category: String,
}

/// Walks the option tree below a slash command, emitting a record for every
/// leaf sub-command with its space-joined qualified name.
fn expand_sub_commands(
    parent: &ParentRecord<'_>,
    options: &[CommandOption],
    prefix: &str,
    registry: &MetaRegistry,
    records: &mut Vec<AppCommand>,
) {
    let default_meta = CommandMeta::default();
    let command = parent.command;

    for option in options {
        let qualified = format!("{prefix} {}", option.name);
        match option.kind {
            CommandOptionType::SubCommandGroup => {
                expand_sub_commands(parent, &option.options, &qualified, registry, records);
            }
            CommandOptionType::SubCommand => {
                // Sub-commands may carry their own meta entry, keyed by
                // qualified name; anything it leaves unset comes from the
                // parent.
                let meta = registry.get(&qualified).unwrap_or(&default_meta);
                let checks = if checks_of(meta).is_empty() {
                    parent.checks.clone()
                } else {
                    checks_of(meta)
                };
                let category = match category_of(meta) {
                    ref own if own.is_empty() => parent.category.clone(),
                    own => own,
                };

                records.push(AppCommand {
                    id: command.id,
                    kind: CommandKind::SubCommand,
                    name: qualified.clone(),
                    canonical_name: qualified.clone(),
                    description: describe(meta, &option.description),
                    args: collect_args(&option.options),
                    checks,
                    cooldown: meta.cooldown.clone().or_else(|| parent.cooldown.clone()),
                    category,
                    guild_id: command.guild_id,
                    default_member_permissions: command.default_member_permissions,
                    dm_permission: dm_permission_of(command),
                    nsfw: command.nsfw,
                    name_localizations: command.name_localizations.clone(),
                    description_localizations: command.description_localizations.clone(),
                    extras: meta.extras.clone(),
                    parent: Some(ParentRef {
                        id: command.id,
                        name: command.name.clone(),
                    }),
                });
            }
            _ => {}
        }
    }
}

/// Non-group options become arguments; sub-commands and groups never do.
fn collect_args(options: &[CommandOption]) -> Vec<Argument> {
    options
        .iter()
        .filter(|option| {
            !matches!(
                option.kind,
                CommandOptionType::SubCommand | CommandOptionType::SubCommandGroup
            )
        })
        .map(|option| Argument {
            name: option.name.clone(),
            description: option.description.clone(),
            required: option.required,
            choices: option
                .choices
                .iter()
                .map(|choice| Choice {
                    name: choice.name.clone(),
                    value: stringify(&choice.value),
                })
                .collect(),
            name_localizations: option.name_localizations.clone(),
            description_localizations: option.description_localizations.clone(),
        })
        .collect()
}

/// Meta help text wins, then the registered description, then a dash.
fn describe(meta: &CommandMeta, registered: &str) -> String {
    if let Some(help) = &meta.help {
        help.clone()
    } else if !registered.is_empty() {
        registered.to_owned()
    } else {
        "-".to_owned()
    }
}

/// Meta category wins, then the `category` and `plugin` extras keys.
fn category_of(meta: &CommandMeta) -> String {
    meta.category
        .clone()
        .or_else(|| meta.extras.get(extras_keys::CATEGORY).cloned())
        .or_else(|| meta.extras.get(extras_keys::PLUGIN).cloned())
        .unwrap_or_default()
}

fn checks_of(meta: &CommandMeta) -> CommandChecks {
    CommandChecks {
        permissions: meta.permissions,
        roles: meta.roles.clone(),
    }
}

/// Discord omits `dm_permission` for guild commands, which can never run in
/// DMs; global commands default to DM-enabled.
fn dm_permission_of(command: &Command) -> bool {
    command.dm_permission.unwrap_or(command.guild_id.is_none())
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serenity::all::Permissions;

    fn fixture(value: serde_json::Value) -> Command {
        serde_json::from_value(value).expect("valid command fixture")
    }

    fn ban_command() -> Command {
        fixture(json!({
            "id": "1",
            "application_id": "10",
            "version": "100",
            "type": 1,
            "name": "ban",
            "description": "Ban a member.",
            "default_member_permissions": "4",
            "dm_permission": false,
            "options": [
                {
                    "type": 6,
                    "name": "user",
                    "description": "Who to ban.",
                    "required": true
                },
                {
                    "type": 3,
                    "name": "duration",
                    "description": "How long.",
                    "choices": [
                        {"name": "a day", "value": "1d"},
                        {"name": "a week", "value": "7d"}
                    ]
                }
            ]
        }))
    }

    fn config_command() -> Command {
        fixture(json!({
            "id": "2",
            "application_id": "10",
            "version": "100",
            "type": 1,
            "name": "config",
            "description": "Manage configuration.",
            "options": [
                {
                    "type": 1,
                    "name": "set",
                    "description": "Set a value.",
                    "options": [
                        {"type": 3, "name": "key", "description": "The key.", "required": true},
                        {"type": 3, "name": "value", "description": "The value.", "required": true}
                    ]
                },
                {
                    "type": 2,
                    "name": "alias",
                    "description": "Manage aliases.",
                    "options": [
                        {
                            "type": 1,
                            "name": "add",
                            "description": "Add an alias.",
                            "options": [
                                {"type": 3, "name": "name", "description": "Alias name.", "required": true}
                            ]
                        }
                    ]
                }
            ]
        }))
    }

    fn user_command() -> Command {
        fixture(json!({
            "id": "3",
            "application_id": "10",
            "version": "100",
            "type": 2,
            "name": "Report User",
            "description": ""
        }))
    }

    fn walk_all(commands: &[Command], registry: &MetaRegistry) -> Vec<AppCommand> {
        walk(commands, registry, &HashSet::new())
    }

    #[test]
    fn plain_slash_command_maps_to_one_record() {
        let registry = MetaRegistry::new().with(
            "ban",
            CommandMeta {
                category: Some("Moderation".into()),
                permissions: Permissions::BAN_MEMBERS,
                ..Default::default()
            },
        );

        let records = walk_all(&[ban_command()], &registry);
        assert_eq!(records.len(), 1);

        let ban = &records[0];
        assert_eq!(ban.kind, CommandKind::Slash);
        assert_eq!(ban.canonical_name, "ban");
        assert_eq!(ban.description, "Ban a member.");
        assert_eq!(ban.category, "Moderation");
        assert_eq!(ban.checks.permissions, Permissions::BAN_MEMBERS);
        assert_eq!(
            ban.default_member_permissions,
            Some(Permissions::BAN_MEMBERS)
        );
        assert!(!ban.dm_permission);
        assert!(ban.parent.is_none());

        assert_eq!(ban.args.len(), 2);
        assert!(ban.args[0].required);
        assert_eq!(
            ban.args[1].choices,
            vec![
                Choice {
                    name: "a day".into(),
                    value: "1d".into()
                },
                Choice {
                    name: "a week".into(),
                    value: "7d".into()
                },
            ]
        );
    }

    #[test]
    fn sub_commands_expand_to_leaf_records() {
        let registry = MetaRegistry::new()
            .with(
                "config",
                CommandMeta {
                    category: Some("Admin".into()),
                    permissions: Permissions::MANAGE_GUILD,
                    cooldown: Some(Cooldown {
                        rate: 1,
                        per: 5.0,
                        bucket: Default::default(),
                    }),
                    ..Default::default()
                },
            )
            .with(
                "config set",
                CommandMeta {
                    help: Some("Set a configuration value.".into()),
                    ..Default::default()
                },
            );

        let records = walk_all(&[config_command()], &registry);
        let names: Vec<_> = records.iter().map(|r| r.canonical_name.as_str()).collect();
        assert_eq!(names, vec!["config set", "config alias add"]);

        let set = &records[0];
        assert_eq!(set.kind, CommandKind::SubCommand);
        // meta help override beats the registered option description
        assert_eq!(set.description, "Set a configuration value.");
        // inherited from the parent entry
        assert_eq!(set.category, "Admin");
        assert_eq!(set.checks.permissions, Permissions::MANAGE_GUILD);
        assert!(set.cooldown.is_some());
        assert_eq!(set.parent.as_ref().unwrap().name, "config");
        assert_eq!(set.id, records[1].id);
        assert_eq!(set.args.len(), 2);

        let alias_add = &records[1];
        assert_eq!(alias_add.description, "Add an alias.");
        assert_eq!(alias_add.args.len(), 1);
    }

    #[test]
    fn context_commands_fall_back_to_dash_description() {
        let records = walk_all(&[user_command()], &MetaRegistry::new());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, CommandKind::User);
        assert_eq!(records[0].description, "-");
        assert!(records[0].args.is_empty());
        // global command with dm_permission unset defaults to DM-enabled
        assert!(records[0].dm_permission);
    }

    #[test]
    fn category_falls_back_to_extras_keys() {
        let registry = MetaRegistry::new().with(
            "Report User",
            CommandMeta {
                extras: [("plugin".to_owned(), "Safety".to_owned())].into(),
                ..Default::default()
            },
        );
        let records = walk_all(&[user_command()], &registry);
        assert_eq!(records[0].category, "Safety");
    }

    #[test]
    fn ignored_and_unknown_commands_are_skipped() {
        let unknown = fixture(json!({
            "id": "9",
            "application_id": "10",
            "version": "100",
            "type": 99,
            "name": "mystery",
            "description": "?"
        }));

        let ignore = HashSet::from(["ban"]);
        let records = walk(&[ban_command(), unknown, user_command()], &MetaRegistry::new(), &ignore);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].canonical_name, "Report User");
    }

    #[test]
    fn guild_commands_are_never_dm_enabled() {
        let guild_cmd = fixture(json!({
            "id": "4",
            "application_id": "10",
            "version": "100",
            "type": 1,
            "name": "local",
            "description": "Guild only.",
            "guild_id": "99"
        }));
        let records = walk_all(&[guild_cmd], &MetaRegistry::new());
        assert_eq!(records[0].guild_id.map(|g| g.get()), Some(99));
        assert!(!records[0].dm_permission);
    }
}
