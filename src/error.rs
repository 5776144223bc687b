use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors raised at the edges of the board.
///
/// Board operations themselves never fail: a stale or unknown id is a no-op.
/// Only configuration, payload decoding and the async runtime report errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Board driver has shut down")]
    DriverClosed,

    #[error("{0}")]
    Other(String),
}
