//! Chapter module backed by a package manifest.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gallery_chapter::{Chapter, NavArgs};
use gallery_links::LinkBundle;
use gallery_nav::{Layout, NavError, NavHeader, NavNode, RouteValue};

use crate::manifest::{Manifest, NavEntry};

/// A chapter loaded from a filesystem package directory.
pub struct ManifestChapter {
    title: String,
    abstract_md: String,
    links: LinkBundle,
    nav: NavEntry,
    package_dir: PathBuf,
}

impl ManifestChapter {
    /// Build a chapter from its parsed manifest and package directory.
    #[must_use]
    pub fn new(manifest: &Manifest, package_dir: impl Into<PathBuf>) -> Self {
        Self {
            title: manifest.chapter.title.clone(),
            abstract_md: manifest.chapter.abstract_md.clone(),
            links: manifest.link_bundle(),
            nav: manifest.nav.clone(),
            package_dir: package_dir.into(),
        }
    }
}

#[async_trait]
impl Chapter for ManifestChapter {
    fn title(&self) -> &str {
        &self.title
    }

    fn abstract_md(&self) -> &str {
        &self.abstract_md
    }

    fn links(&self) -> &LinkBundle {
        &self.links
    }

    async fn navigation(&self, args: NavArgs) -> Result<NavNode, NavError> {
        let _guard = args.context.span().entered();
        tracing::debug!(mount = %args.mount_path, "building navigation from manifest");
        Ok(build_node(&self.nav, &self.package_dir))
    }
}

/// Build a navigation node from a manifest entry.
///
/// Routes carrying a `manifest` reference become deferred values that
/// read and parse the referenced nav manifest when first traversed.
fn build_node(entry: &NavEntry, package_dir: &Path) -> NavNode {
    let mut node = NavNode::new(entry.name.clone(), layout_of(entry, package_dir));
    if let Some(icon) = &entry.icon {
        node = node.with_header(NavHeader::icon(icon));
    }
    for child in &entry.routes {
        // Validated at parse time.
        let Some(path) = child.path.clone() else {
            continue;
        };
        let value = if let Some(manifest_file) = &child.manifest {
            deferred_subtree(package_dir.join(manifest_file))
        } else {
            RouteValue::Resolved(build_node(child, package_dir))
        };
        node.routes.insert(path, value);
    }
    node
}

fn layout_of(entry: &NavEntry, package_dir: &Path) -> Layout {
    let asset = |file: &str| package_dir.join(file).display().to_string();
    match (&entry.widget, &entry.layout) {
        (Some(kind), Some(file)) => Layout::Widget {
            kind: kind.clone(),
            url: asset(file),
        },
        (None, Some(file)) => Layout::Asset { file: asset(file) },
        // Nothing declared: an empty page, children carry the content.
        (_, None) => Layout::Markdown(String::new()),
    }
}

/// Deferred route value reading a standalone nav manifest on traversal.
fn deferred_subtree(manifest_path: PathBuf) -> RouteValue {
    let package_dir = manifest_path
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf);
    RouteValue::deferred(move || {
        let manifest_path = manifest_path.clone();
        let package_dir = package_dir.clone();
        async move {
            let content = tokio::fs::read_to_string(&manifest_path)
                .await
                .map_err(|e| {
                    NavError::Deferred(format!("{}: {e}", manifest_path.display()))
                })?;
            let nav = NavEntry::parse(&content)
                .map_err(|e| NavError::Deferred(format!("{}: {e}", manifest_path.display())))?;
            Ok(build_node(&nav, &package_dir))
        }
    })
}

#[cfg(test)]
mod tests {
    use gallery_chapter::RootContext;
    use gallery_nav::Router;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::manifest::Manifest;

    const SAMPLE: &str = r#"
[package]
name = "@w3gallery/alpha"
version = "0.1.0"

[chapter]
title = "Alpha"
abstract = "First chapter."

[nav]
name = "Alpha"
icon = "fas fa-atom"
layout = "home.md"
widget = "notebook"

[[nav.routes]]
path = "/utils"
name = "Utilities"
layout = "utils.md"
"#;

    fn nav_args() -> NavArgs {
        NavArgs {
            context: RootContext::for_chapter("alpha"),
            mount_path: "/alpha".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_navigation_from_manifest() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let chapter = ManifestChapter::new(&manifest, "/pkg/alpha");

        let node = chapter.navigation(nav_args()).await.unwrap();
        assert_eq!(node.name, "Alpha");
        assert_eq!(
            node.header,
            Some(NavHeader::icon("fas fa-atom"))
        );
        assert_eq!(
            node.layout,
            Layout::Widget {
                kind: "notebook".to_owned(),
                url: "/pkg/alpha/home.md".to_owned()
            }
        );
        match node.routes.get("/utils") {
            Some(RouteValue::Resolved(child)) => {
                assert_eq!(child.name, "Utilities");
                assert_eq!(
                    child.layout,
                    Layout::Asset {
                        file: "/pkg/alpha/utils.md".to_owned()
                    }
                );
            }
            other => panic!("unexpected route value: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deferred_manifest_resolved_by_router() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("api.nav.toml"),
            r#"
[nav]
name = "API"
layout = "api.md"
"#,
        )
        .unwrap();

        let manifest = Manifest::parse(
            r#"
[package]
name = "@w3gallery/alpha"
version = "0.1.0"

[chapter]
title = "Alpha"
abstract = "First chapter."

[nav]
name = "Alpha"

[[nav.routes]]
path = "/api"
name = "API"
manifest = "api.nav.toml"
"#,
        )
        .unwrap();
        let chapter = ManifestChapter::new(&manifest, dir.path());

        let node = chapter.navigation(nav_args()).await.unwrap();
        assert!(matches!(node.routes.get("/api"), Some(RouteValue::Deferred(_))));

        let router = Router::new(node);
        let page = router.resolve("/api").await.unwrap();
        assert_eq!(page.name, "API");
    }

    #[tokio::test]
    async fn test_deferred_manifest_missing_file_fails_inert() {
        let manifest = Manifest::parse(
            r#"
[package]
name = "@w3gallery/alpha"
version = "0.1.0"

[chapter]
title = "Alpha"
abstract = "First chapter."

[nav]
name = "Alpha"

[[nav.routes]]
path = "/api"
name = "API"
manifest = "missing.nav.toml"
"#,
        )
        .unwrap();
        let chapter = ManifestChapter::new(&manifest, "/nonexistent");

        let node = chapter.navigation(nav_args()).await.unwrap();
        let router = Router::new(node);
        let err = router.resolve("/api").await.unwrap_err();
        assert!(err.to_string().contains("missing.nav.toml"));
    }
}
