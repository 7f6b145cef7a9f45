//! CLI error types.

use apidoc_config::ConfigError;
use apidoc_model::ModelError;
use apidoc_render::RenderError;
use apidoc_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Validation(String),
}
