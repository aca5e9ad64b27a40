//! Presentation helpers: embed builders, the button paginator, and the
//! interaction trait they run on.

pub mod embeds;
pub mod interaction;
pub mod paginator;

pub use interaction::{DiscordInteraction, run_and_report_error};
pub use paginator::Paginator;

use serenity::all::{Guild, Role};

use crate::types::{CommandChecks, RoleRequirement};

/// Resolves a command's role requirements against a guild's role list.
/// Requirements that don't resolve (deleted role, typo'd name) are dropped.
pub fn roles_from_checks<'a>(checks: &CommandChecks, guild: &'a Guild) -> Vec<&'a Role> {
    checks
        .roles
        .iter()
        .filter_map(|requirement| match requirement {
            RoleRequirement::Id(id) => guild.roles.get(id),
            RoleRequirement::Name(name) => guild.role_by_name(name),
        })
        .collect()
}

/// Cuts `text` down to at most `max` bytes without splitting a character.
pub(crate) fn clamp_chars(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_respects_char_boundaries() {
        assert_eq!(clamp_chars("hello", 10), "hello");
        assert_eq!(clamp_chars("hello", 3), "hel");
        // é is two bytes; cutting mid-character backs off
        assert_eq!(clamp_chars("héllo", 2), "h");
    }
}
