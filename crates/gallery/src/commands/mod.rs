//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod links;
pub(crate) mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use gallery_app::Gallery;
use gallery_chapter::{InstallEvent, LoaderRegistry};
use gallery_config::{CliSettings, Config};
use gallery_loader_fs::FsChapterLoader;

pub(crate) use check::CheckArgs;
pub(crate) use links::LinksArgs;
pub(crate) use tree::TreeArgs;

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by every command that loads a gallery project.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover gallery.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chapter packages directory (overrides config).
    #[arg(long)]
    chapters_dir: Option<PathBuf>,

    /// Base links JSON document (overrides config).
    #[arg(long)]
    base_links: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// Load the configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            chapters_dir: self.chapters_dir.clone(),
            base_links: self.base_links.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Load the project config and run the full startup sequence.
///
/// Install progress is reported through `output` the way the loading
/// screen would report it in the application.
pub(crate) async fn load_gallery(
    args: &ProjectArgs,
    output: &Output,
) -> Result<(Config, Gallery), CliError> {
    let config = args.load_config()?;
    if let Some(path) = &config.config_path {
        output.muted(&format!("Using configuration: {}", path.display()));
    }

    let mut registry = LoaderRegistry::new();
    let chapters_dir = config.chapters_dir();
    if chapters_dir.is_dir() {
        registry.register(Arc::new(FsChapterLoader::new(&chapters_dir)?));
    } else if !config.chapter.is_empty() {
        return Err(CliError::Validation(format!(
            "chapters directory not found: {}",
            chapters_dir.display()
        )));
    }

    let gallery = gallery_app::bootstrap(&config, &Arc::new(registry), |event| match event {
        InstallEvent::Started { count } => {
            output.info(&format!("Installing {count} chapter(s)..."));
        }
        InstallEvent::PackageLoaded { key } => output.info(&format!("  loaded {key}")),
        InstallEvent::Failed { key } => output.error(&format!("  failed {key}")),
        InstallEvent::Done => output.success("All chapters installed."),
    })
    .await?;

    Ok((config, gallery))
}
