//! `gallery check` command implementation.
//!
//! Runs the full startup sequence against the configured project and
//! reports what would be served, without starting anything.

use clap::Args;
use gallery_links::LinkCategory;

use crate::commands::{ProjectArgs, load_gallery};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error when configuration, install or assembly fails.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, gallery) = load_gallery(&self.project, &output).await?;

        output.separator();
        output.highlight(&config.app.title);
        if !config.app.description.is_empty() {
            output.info(&config.app.description);
        }

        output.info("");
        output.info("Chapters:");
        if gallery.chapters().is_empty() {
            output.muted("  (none)");
        }
        for chapter in gallery.chapters() {
            output.info(&format!("  {}  {}", chapter.nav(), chapter.title()));
        }

        output.info("");
        output.info("Links:");
        for category in LinkCategory::ALL {
            output.info(&format!(
                "  {}: {} entries",
                category,
                gallery.link_registry().category_len(category)
            ));
        }

        let routes = gallery.router().root().routes.len();
        output.info("");
        output.success(&format!(
            "Gallery OK: {} chapter(s), {} top-level route(s).",
            gallery.chapters().len(),
            routes
        ));
        Ok(())
    }
}
