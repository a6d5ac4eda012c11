//! CLI error types.

use chai_config::ConfigError;
use chai_server::StartupError;
use chai_styles::StyleError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Server(#[from] StartupError),

    #[error("{0}")]
    Style(#[from] StyleError),

    #[error("{count} documentation group(s) failed to build")]
    InvalidContent {
        /// Number of failing groups.
        count: usize,
    },
}
