//! CLI error types.

use gallery_app::BootstrapError;
use gallery_chapter::LoaderError;
use gallery_config::ConfigError;
use gallery_nav::RouterError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Loader(#[from] LoaderError),

    #[error("{0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("{0}")]
    Router(#[from] RouterError),

    #[error("{0}")]
    Validation(String),
}
