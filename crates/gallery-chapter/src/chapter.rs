//! The chapter module contract.

use std::sync::Arc;

use async_trait::async_trait;
use gallery_links::LinkBundle;
use gallery_nav::{NavError, NavNode};

use crate::context::RootContext;

/// Arguments passed to a chapter's navigation factory.
#[derive(Clone, Debug)]
pub struct NavArgs {
    /// Observability context for this invocation.
    pub context: RootContext,
    /// Mount path of the chapter within the gallery (`/` + nav key).
    pub mount_path: String,
}

/// The shape every installable chapter must satisfy.
///
/// The navigation factory may itself perform further loads (e.g. a
/// generated API subtree), so it is async and may return deferred route
/// values for anything it wants resolved only on traversal.
#[async_trait]
pub trait Chapter: Send + Sync {
    /// Display title.
    fn title(&self) -> &str;

    /// Short descriptive markdown; may embed cross-references.
    fn abstract_md(&self) -> &str;

    /// The chapter's link maps.
    fn links(&self) -> &LinkBundle;

    /// Build the chapter's navigation subtree.
    async fn navigation(&self, args: NavArgs) -> Result<NavNode, NavError>;
}

/// A chapter after module resolution, tagged with its mount path.
///
/// Created once at startup; immutable thereafter.
#[derive(Clone)]
pub struct InstalledChapter {
    key: String,
    nav: String,
    module: Arc<dyn Chapter>,
}

impl InstalledChapter {
    /// Tag a loaded module with its navigation key.
    #[must_use]
    pub fn new(key: impl Into<String>, module: Arc<dyn Chapter>) -> Self {
        let key = key.into();
        let nav = format!("/{key}");
        Self { key, nav, module }
    }

    /// Navigation key (mount path segment without the slash).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mount path (`/` + navigation key).
    #[must_use]
    pub fn nav(&self) -> &str {
        &self.nav
    }

    /// The loaded chapter module.
    #[must_use]
    pub fn module(&self) -> &Arc<dyn Chapter> {
        &self.module
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.module.title()
    }

    /// Abstract markdown.
    #[must_use]
    pub fn abstract_md(&self) -> &str {
        self.module.abstract_md()
    }

    /// Link maps.
    #[must_use]
    pub fn links(&self) -> &LinkBundle {
        self.module.links()
    }
}

impl std::fmt::Debug for InstalledChapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledChapter")
            .field("key", &self.key)
            .field("nav", &self.nav)
            .field("title", &self.module.title())
            .finish_non_exhaustive()
    }
}
