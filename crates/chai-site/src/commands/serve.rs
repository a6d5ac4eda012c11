//! `chai-site serve` command implementation.

use chai_config::CliSettings;
use chai_server::run_server;
use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and compilation logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, content is invalid or the
    /// server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.site.load(CliSettings {
            host: self.host,
            port: self.port,
            site_dir: None,
        })?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Site directory: {}",
            config.site_resolved.dir.display()
        ));
        output.info(&format!(
            "Documentation groups: {}",
            config
                .groups
                .iter()
                .map(|group| group.slug.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.info(&format!("Exercise solutions: {}", config.exercises.base_url));

        run_server(&config).await?;

        Ok(())
    }
}
