use std::path::PathBuf;

use thiserror::Error;

use crate::options::OptionError;

#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Option(#[from] OptionError),

    #[error("failed to write book to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
