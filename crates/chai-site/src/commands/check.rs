//! `chai-site check` command implementation.
//!
//! Builds the navigation of every configured group without starting the
//! server and reports each broken group instead of stopping at the first.

use chai_config::CliSettings;
use chai_docs::DocsCatalog;
use chai_server::group_spec;
use chai_storage::FsStorage;
use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidContent`] if any group fails to build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load(CliSettings::default())?;

        let storage = FsStorage::new(config.site_resolved.content_dir.clone());
        let results = DocsCatalog::check(&storage, config.groups.iter().map(group_spec));

        let mut failed = 0;
        for (spec, result) in results {
            match result {
                Ok(navigation) => {
                    output.success(&format!(
                        "{} ({}): {} chapter(s), {} page(s)",
                        spec.name,
                        spec.route,
                        navigation.chapters().len(),
                        navigation.entries().len()
                    ));
                }
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{} ({}): invalid", spec.name, spec.route));
                    output.detail(&err.to_string());
                }
            }
        }

        if config.groups.is_empty() {
            output.warning("No documentation groups configured");
        }

        if failed > 0 {
            return Err(CliError::InvalidContent { count: failed });
        }
        Ok(())
    }
}
