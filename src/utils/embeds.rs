//! Pre-configured embeds for rendering [`AppCommand`] records.

use serenity::all::{
    Colour, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, Guild, Mentionable,
};

use crate::{constant, types::AppCommand};

use super::{clamp_chars, roles_from_checks};

/// Appearance knobs for [`commands_overview_embeds`].
#[derive(Debug, Clone)]
pub struct OverviewOptions {
    /// Characters per field; clamped to Discord's 1024 limit. Much past 400
    /// the embeds get very tall.
    pub max_field_chars: usize,
    /// Fields per embed; clamped to Discord's 25 limit.
    pub max_fields: usize,
    pub color: Option<Colour>,
    pub thumbnail_url: Option<String>,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            max_field_chars: constant::embed::MAX_CHARS_PER_FIELD,
            max_fields: constant::embed::MAX_FIELDS_PER_EMBED,
            color: None,
            thumbnail_url: None,
        }
    }
}

/// Builds an embed detailing one command: mention, description, permission
/// and role requirements, cooldown, and (for slash commands) parameters.
///
/// Pass the guild the embed will be shown in to render role requirements as
/// role mentions rather than plain names.
pub fn command_detail_embed(
    command: &AppCommand,
    guild: Option<&Guild>,
    color: Option<Colour>,
) -> CreateEmbed {
    let nsfw = if command.nsfw { " (NSFW)" } else { "" };
    let mut embed = CreateEmbed::new()
        .author(CreateEmbedAuthor::new(format!(
            "{} Details{nsfw}",
            command.kind
        )))
        .description(format!("{}\n{}", command.mention(), command.description));

    if let Some(color) = color {
        embed = embed.colour(color);
    }

    if !command.checks.permissions.is_empty() {
        embed = embed.field(
            "Required Permissions",
            command.checks.permission_names().join(", "),
            true,
        );
    }

    if !command.checks.roles.is_empty() {
        let resolved = guild.map(|guild| roles_from_checks(&command.checks, guild));
        let roles = match resolved {
            Some(roles) if !roles.is_empty() => roles
                .iter()
                .map(|role| role.mention().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            _ => command
                .checks
                .roles
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        };
        embed = embed.field("Required Role(s)", format!("**Required Roles**:\n{roles}"), true);
    }

    if let Some(cooldown) = &command.cooldown {
        embed = embed.field("Cooldown", cooldown.to_string(), true);
    }

    if command.kind.is_mentionable() {
        embed = embed.footer(CreateEmbedFooter::new("[ required ] | ( optional )"));
        let parameters = if command.args.is_empty() {
            "None".to_owned()
        } else {
            command
                .args
                .iter()
                .map(|arg| format!("**{arg}**: *{}*", arg.description))
                .collect::<Vec<_>>()
                .join("\n")
        };
        embed = embed.field(
            "Parameters",
            clamp_chars(&parameters, constant::embed::MAX_CHARS_PER_FIELD),
            false,
        );
    }

    embed
}

/// Builds embeds listing every given command with its mention, kind and
/// description, chunked to stay inside Discord's field limits. An empty
/// command list yields no embeds.
pub fn commands_overview_embeds(
    commands: &[AppCommand],
    options: &OverviewOptions,
) -> Vec<CreateEmbed> {
    let max_field_chars = options
        .max_field_chars
        .clamp(1, constant::embed::MAX_CHARS_PER_FIELD);
    let max_fields = options.max_fields.clamp(1, constant::embed::MAX_FIELDS_PER_EMBED);

    let mut embeds: Vec<CreateEmbed> = Vec::new();
    let mut current: Option<CreateEmbed> = None;
    let mut created = 0usize;
    let mut field = String::new();
    let mut field_count = 0usize;

    for command in commands {
        let nsfw = if command.nsfw { " *(NSFW)*" } else { "" };
        let line = format!(
            "{} *({})*{nsfw}\n{}\n\n",
            command.mention(),
            command.kind,
            command.description
        );
        let line = clamp_chars(&line, max_field_chars);

        if !field.is_empty() && field.len() + line.len() > max_field_chars {
            let embed = take_or_start(&mut current, &mut created, options)
                .field("\u{200b}", field.as_str(), false);
            field.clear();
            field_count += 1;
            if field_count >= max_fields {
                embeds.push(embed);
                field_count = 0;
            } else {
                current = Some(embed);
            }
        }
        field.push_str(line);
    }

    if !field.is_empty() {
        let embed = take_or_start(&mut current, &mut created, options);
        embeds.push(embed.field("\u{200b}", field, false));
    } else if let Some(embed) = current {
        embeds.push(embed);
    }

    embeds
}

fn take_or_start(
    current: &mut Option<CreateEmbed>,
    created: &mut usize,
    options: &OverviewOptions,
) -> CreateEmbed {
    current.take().unwrap_or_else(|| {
        *created += 1;
        base_embed(*created == 1, options)
    })
}

fn base_embed(first: bool, options: &OverviewOptions) -> CreateEmbed {
    let title = if first {
        "Commands Overview"
    } else {
        "Commands Overview (continued)"
    };
    let mut embed = CreateEmbed::new().title(title);
    if let Some(color) = options.color {
        embed = embed.colour(color);
    }
    if let Some(url) = &options.thumbnail_url {
        embed = embed.thumbnail(url.clone());
    }
    embed
}
