//! The normalized command records produced by the walker and handed out by
//! [`CommandIndex`](crate::CommandIndex) queries.

mod argument;
mod checks;
mod command;

pub use argument::{Argument, Choice};
pub use checks::{CommandChecks, Cooldown, CooldownBucket, RoleRequirement};
pub use command::{AppCommand, CommandKind, ParentRef};

use std::collections::HashMap;

/// Locale tag (e.g. `en-US`) to translated text.
pub type Localizations = HashMap<String, String>;

/// Looks up `locale` in an optional localization map, falling back to the
/// non-localized value.
pub(crate) fn localized<'a>(
    localizations: Option<&'a Localizations>,
    locale: &str,
    fallback: &'a str,
) -> &'a str {
    localizations
        .and_then(|map| map.get(locale))
        .map(String::as_str)
        .unwrap_or(fallback)
}
