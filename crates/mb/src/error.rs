//! CLI error types.

use mb_config::ConfigError;
use mb_directory::DatasetError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Dataset(#[from] DatasetError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
