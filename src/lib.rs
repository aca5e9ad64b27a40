//! helpcord gathers a serenity bot's registered application commands (slash,
//! user-context and message-context) into normalized, queryable records and
//! renders them as help embeds.
//!
//! Discord's registered-command descriptors carry names, descriptions,
//! options and permission bitsets, but not the categories, cooldowns or
//! permission checks living in the bot's own code. Declare those in a
//! [`MetaRegistry`] (in code or from a TOML file), build a [`CommandIndex`]
//! once after registration, and query it from your help command:
//!
//! ```no_run
//! # async fn example(ctx: serenity::all::Context) -> helpcord::Result<()> {
//! use helpcord::{CommandFilter, CommandIndex, CommandMeta, MetaRegistry, utils};
//!
//! let registry = MetaRegistry::new().with(
//!     "ban",
//!     CommandMeta {
//!         category: Some("Moderation".into()),
//!         ..Default::default()
//!     },
//! );
//!
//! let index = CommandIndex::fetch(&ctx.http, &[], &registry, &[]).await?;
//! let commands = index.filtered(&CommandFilter::new());
//! let embeds = utils::embeds::commands_overview_embeds(&commands, &Default::default());
//! # Ok(())
//! # }
//! ```
//!
//! The index is a snapshot of what was registered when it was built; it is
//! not kept in sync with later registration changes.

pub mod constant;
mod error;
mod index;
pub mod meta;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use index::{CommandFilter, CommandIndex};
pub use meta::{CommandMeta, MetaRegistry};
pub use types::{
    AppCommand, Argument, Choice, CommandChecks, CommandKind, Cooldown, CooldownBucket,
    ParentRef, RoleRequirement,
};
