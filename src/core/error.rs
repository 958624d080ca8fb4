//! Errors at the configuration boundary.
//!
//! Gameplay never fails: bad input comes back as a verdict enum from the
//! engine. Only loading a configuration can return an error.

use std::path::PathBuf;

use derive_more::{Display, Error};

/// Configuration could not be loaded or is unusable.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[display("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`GamesConfig`](super::GamesConfig).
    #[display("failed to parse config: {_0}")]
    Parse(toml::de::Error),

    /// A value parsed but cannot drive a game.
    #[display("invalid config: {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}
