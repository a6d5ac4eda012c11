//! CLI command implementations.

pub(crate) mod build_styles;
pub(crate) mod check;
pub(crate) mod serve;

use std::path::PathBuf;

use chai_config::{CliSettings, Config};
use clap::Args;

use crate::error::CliError;

pub(crate) use build_styles::BuildStylesArgs;
pub(crate) use check::CheckArgs;
pub(crate) use serve::ServeArgs;

/// Arguments locating the site, shared by every command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover chai-site.toml).
    #[arg(short, long, env = "CHAI_SITE_CONFIG")]
    config: Option<PathBuf>,

    /// Site directory holding content, templates, views and static files
    /// (overrides config).
    #[arg(short, long)]
    site_dir: Option<PathBuf>,
}

impl SiteArgs {
    /// Load the configuration with `settings` applied on top.
    pub(crate) fn load(&self, mut settings: CliSettings) -> Result<Config, CliError> {
        settings.site_dir.clone_from(&self.site_dir);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}
