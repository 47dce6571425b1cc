//! `gallery links` command implementation.
//!
//! Lists the merged link registry, or resolves a single key the way
//! the markdown renderer would.

use clap::{Args, ValueEnum};
use gallery_links::{LinkCategory, LinkRef};

use crate::commands::{ProjectArgs, load_gallery};
use crate::error::CliError;
use crate::output::Output;

/// Link category selector for the CLI.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryArg {
    Ext,
    Api,
    Cross,
    Github,
}

impl From<CategoryArg> for LinkCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Ext => Self::External,
            CategoryArg::Api => Self::Api,
            CategoryArg::Cross => Self::Cross,
            CategoryArg::Github => Self::GitHub,
        }
    }
}

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Restrict to one category.
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// Resolve a single key instead of listing.
    #[arg(long, requires = "category")]
    key: Option<String>,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error when the gallery fails to load.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_config, gallery) = load_gallery(&self.project, &output).await?;
        let registry = gallery.link_registry();

        output.separator();
        if let (Some(category), Some(key)) = (self.category, &self.key) {
            let category = LinkCategory::from(category);
            match registry.resolve(category, key) {
                Some(LinkRef::Nav(target)) => {
                    output.success(&format!("{category} {key} -> {target} (navigation)"));
                }
                Some(LinkRef::Href(target)) => {
                    output.success(&format!("{category} {key} -> {target}"));
                }
                None => output.warning(&format!("{category} {key} is unresolved")),
            }
            return Ok(());
        }

        let categories: Vec<LinkCategory> = match self.category {
            Some(category) => vec![category.into()],
            None => LinkCategory::ALL.to_vec(),
        };
        for category in categories {
            output.highlight(&format!(
                "{category} ({} entries)",
                registry.category_len(category)
            ));
            for (key, target) in registry.category_entries(category) {
                output.info(&format!("  {key} -> {target}"));
            }
        }
        Ok(())
    }
}
