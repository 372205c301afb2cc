use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure or non-2xx HTTP status from the YouTube API.
    /// Never retried; surfaced directly to the invoking layer.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid ISO-8601 duration {literal:?}")]
    InvalidDuration { literal: String },

    #[error("no API key configured; set the YOUTUBE_API_KEY environment variable")]
    MissingApiKey,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom(msg: impl Into<String>) -> Self {
        Error::Custom(msg.into())
    }

    pub fn invalid_duration(literal: impl Into<String>) -> Self {
        Error::InvalidDuration {
            literal: literal.into(),
        }
    }
}
