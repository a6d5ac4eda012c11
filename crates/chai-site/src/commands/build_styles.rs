//! `chai-site build-styles` command implementation.
//!
//! Compiles every stylesheet ahead of time so the first request for each
//! page doesn't pay for compilation.

use chai_config::CliSettings;
use chai_server::style_pipeline;
use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build-styles command.
#[derive(Args)]
pub(crate) struct BuildStylesArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl BuildStylesArgs {
    /// Execute the build-styles command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a stylesheet fails to
    /// compile.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load(CliSettings::default())?;

        output.info(&format!(
            "Compiling {} into {}",
            config.site_resolved.scss_dir().display(),
            config.site_resolved.dist_dir().display()
        ));

        let report = style_pipeline(&config).build_all()?;
        for path in &report.compiled {
            output.detail(&format!("compiled {}", path.display()));
        }

        output.success(&format!(
            "{} compiled, {} up to date",
            report.compiled.len(),
            report.fresh.len()
        ));
        Ok(())
    }
}
