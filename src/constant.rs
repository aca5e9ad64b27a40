/// Discord limits applied when chunking overview embeds
pub mod embed {
    /// Discord rejects embed field values longer than this.
    pub const MAX_CHARS_PER_FIELD: usize = 1024;
    /// Discord rejects embeds with more fields than this.
    pub const MAX_FIELDS_PER_EMBED: usize = 25;
}

/// custom id segments used by the paginator buttons
pub mod button {
    pub const BASE: &str = "help";

    pub const FIRST: &str = "first";
    pub const PREV: &str = "prev";
    pub const COUNT: &str = "count";
    pub const NEXT: &str = "next";
    pub const LAST: &str = "last";
}

/// extras keys the walker understands
pub mod extras {
    /// Long help text overriding the registered description.
    pub const HELP: &str = "help";
    /// Category the command is grouped under.
    pub const CATEGORY: &str = "category";
    /// Accepted alias for `CATEGORY`.
    pub const PLUGIN: &str = "plugin";
}
