//! The startup sequence.
//!
//! Install → link merge → tree assembly → router mount, in that order.
//! Any failure before the router mounts aborts startup; the gallery
//! never renders a partial chapter set.

use std::collections::BTreeMap;
use std::sync::Arc;

use gallery_chapter::{
    InstallError, InstallEvent, InstalledChapter, LoaderRegistry, NavArgs, RootContext,
    install_chapters,
};
use gallery_config::Config;
use gallery_links::{BundleError, LinkBundle, LinkRegistry, LinkResolvers};
use gallery_nav::{
    ChapterMount, Layout, NavError, NavHeader, NavNode, RootSpec, RouteValue, Router,
    assemble_root,
};

use crate::home::{DEFAULT_HOME_TEMPLATE, apply_placeholders, compose_home_page};

/// Markdown shown on the static contribute page.
const CONTRIBUTE_MD: &str = "\
# Contribute

Add an entry to the chapter table in `gallery.toml` and publish a
package exposing the chapter contract: a title, an abstract, a link
bundle and a navigation factory.
";

/// Error aborting the startup sequence.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Chapter installation failed; nothing was assembled.
    #[error(transparent)]
    Install(#[from] InstallError),
    /// A chapter navigation factory failed during assembly.
    #[error(transparent)]
    Nav(#[from] NavError),
    /// The base links document is malformed.
    #[error(transparent)]
    Links(#[from] BundleError),
    /// The base links document could not be read.
    #[error("failed to read base links: {0}")]
    Io(#[from] std::io::Error),
}

/// The assembled gallery: chapters, merged links and the mounted router.
pub struct Gallery {
    chapters: Vec<InstalledChapter>,
    links: Arc<LinkRegistry>,
    router: Router,
}

impl Gallery {
    /// Installed chapters, in chapter table order.
    #[must_use]
    pub fn chapters(&self) -> &[InstalledChapter] {
        &self.chapters
    }

    /// The merged link registry.
    #[must_use]
    pub fn link_registry(&self) -> &Arc<LinkRegistry> {
        &self.links
    }

    /// Per-category resolver callbacks for the markdown renderer.
    #[must_use]
    pub fn link_resolvers(&self) -> LinkResolvers {
        self.links.resolvers()
    }

    /// The mounted router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }
}

/// Run the startup sequence.
///
/// # Errors
///
/// Fail-fast: the first install, link or assembly error aborts startup.
pub async fn bootstrap(
    config: &Config,
    registry: &Arc<LoaderRegistry>,
    progress: impl FnMut(&InstallEvent),
) -> Result<Gallery, BootstrapError> {
    let table = config.chapter_table();
    let chapters = install_chapters(registry, &table, progress).await?;
    tracing::info!(count = chapters.len(), "chapters installed");

    let base = match config.base_links_path() {
        Some(path) => LinkBundle::from_json(&tokio::fs::read_to_string(path).await?)?,
        None => LinkBundle::default(),
    };
    let links = Arc::new(LinkRegistry::build(
        base,
        chapters.iter().map(InstalledChapter::links),
    ));

    let router = Router::new(assemble_tree(config, &chapters).await?);
    Ok(Gallery {
        chapters,
        links,
        router,
    })
}

/// Assemble the root navigation node from the installed chapters.
async fn assemble_tree(
    config: &Config,
    chapters: &[InstalledChapter],
) -> Result<NavNode, NavError> {
    let mut placeholders = BTreeMap::new();
    placeholders.insert("{{title}}".to_owned(), config.app.title.clone());
    placeholders.insert("{{description}}".to_owned(), config.app.description.clone());
    let template = apply_placeholders(DEFAULT_HOME_TEMPLATE, &placeholders);

    let root = RootSpec {
        name: config.app.title.clone(),
        header: Some(NavHeader::icon("fas fa-home")),
        layout: Layout::Markdown(compose_home_page(&template, chapters)),
        static_routes: vec![(
            "/contribute".to_owned(),
            RouteValue::Resolved(NavNode::new(
                "Contribute",
                Layout::Markdown(CONTRIBUTE_MD.to_owned()),
            )),
        )],
    };

    let mounts = chapters
        .iter()
        .map(|chapter| {
            let module = Arc::clone(chapter.module());
            let args = NavArgs {
                context: RootContext::for_chapter(chapter.key()),
                mount_path: chapter.nav().to_owned(),
            };
            ChapterMount {
                mount: chapter.nav().to_owned(),
                subtree: Box::pin(async move { module.navigation(args).await }),
            }
        })
        .collect();

    assemble_root(root, mounts).await
}
