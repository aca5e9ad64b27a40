/// Errors surfaced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Discord API error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("failed to read command metadata: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse command metadata: {0}")]
    Meta(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
