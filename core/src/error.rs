use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, TardyError>;

#[derive(Debug, Error)]
pub enum TardyError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("could not access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("data file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("render error: {0}")]
    Render(String),
}

impl TardyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TardyError::Validation(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TardyError::Persistence {
            path: path.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TardyError::Validation(_))
    }
}
