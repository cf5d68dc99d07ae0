//! Harness error types

use std::path::PathBuf;

use item_board_core::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid harness config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid spec file {path:?}: {source}")]
    SpecParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid spec pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("API origin {api} differs from base URL origin {base} while web security is on")]
    CrossOrigin { api: String, base: String },
}

pub type Result<T> = std::result::Result<T, HarnessError>;

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
