//! Path resolution over the navigation tree.
//!
//! The router walks `/`-prefixed path segments from the root node,
//! evaluating deferred subtrees on first traversal and caching the
//! result keyed by accumulated path, so repeated navigation into a lazy
//! subtree does not re-run its thunk.
//!
//! An optional alias table rewrites browser-visible path prefixes to
//! canonical tree paths before resolution.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::node::{Layout, NavError, NavNode, RouteValue};

/// Error returned when path resolution fails.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// No page exists at the requested path.
    #[error("no page at `{0}`")]
    NotFound(String),
    /// A deferred subtree failed while being resolved.
    #[error(transparent)]
    Nav(#[from] NavError),
}

/// Resolved page handed to the rendering layer.
#[derive(Clone, Debug)]
pub struct PageRef {
    /// Display name of the resolved node.
    pub name: String,
    /// Page content contract.
    pub layout: Layout,
    /// Child segments, in navigation order.
    pub children: Vec<String>,
}

impl PageRef {
    fn from_node(node: &NavNode) -> Self {
        Self {
            name: node.name.clone(),
            layout: node.layout.clone(),
            children: node.routes.segments().map(str::to_owned).collect(),
        }
    }
}

/// Router over an assembled navigation tree.
///
/// The tree is written once at startup; the only interior mutability is
/// the cache of resolved deferred subtrees.
pub struct Router {
    root: NavNode,
    aliases: Vec<(String, String)>,
    resolved: Mutex<HashMap<String, Arc<NavNode>>>,
}

impl Router {
    /// Router without path aliases.
    #[must_use]
    pub fn new(root: NavNode) -> Self {
        Self::with_aliases(root, HashMap::new())
    }

    /// Router with a path-alias table.
    ///
    /// Each entry rewrites a browser-visible path prefix to a canonical
    /// tree path. Longer prefixes take precedence.
    #[must_use]
    pub fn with_aliases(root: NavNode, aliases: HashMap<String, String>) -> Self {
        let mut aliases: Vec<(String, String)> = aliases.into_iter().collect();
        aliases.sort_by_key(|(prefix, _)| Reverse(prefix.len()));
        Self {
            root,
            aliases,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// The root navigation node.
    #[must_use]
    pub fn root(&self) -> &NavNode {
        &self.root
    }

    /// Resolve a path to a page.
    ///
    /// `""` and `"/"` resolve to the root node. Deferred subtrees along
    /// the path are evaluated and cached.
    ///
    /// # Errors
    ///
    /// [`RouterError::NotFound`] for unknown segments;
    /// [`RouterError::Nav`] when a deferred thunk fails.
    pub async fn resolve(&self, path: &str) -> Result<PageRef, RouterError> {
        let canonical = self.apply_alias(path);
        let segments = split_segments(&canonical);
        self.walk(&self.root, &segments, String::new(), &canonical)
            .await
    }

    /// Walk segments by reference; nothing is copied until the page is
    /// materialized. A deferred boundary swaps to the cached subtree and
    /// continues from there.
    fn walk<'a>(
        &'a self,
        start: &'a NavNode,
        segments: &'a [String],
        mut walked: String,
        canonical: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<PageRef, RouterError>> + Send + 'a>> {
        Box::pin(async move {
            let mut node = start;
            for (idx, segment) in segments.iter().enumerate() {
                walked.push_str(segment);
                let value = node
                    .routes
                    .get(segment)
                    .ok_or_else(|| RouterError::NotFound(canonical.to_owned()))?;
                match value {
                    RouteValue::Resolved(child) => node = child,
                    RouteValue::Deferred(deferred) => {
                        let child = {
                            let mut cache = self.resolved.lock().await;
                            if let Some(hit) = cache.get(&walked) {
                                Arc::clone(hit)
                            } else {
                                tracing::debug!(path = %walked, "resolving deferred subtree");
                                let resolved = Arc::new(deferred.resolve().await?);
                                cache.insert(walked.clone(), Arc::clone(&resolved));
                                resolved
                            }
                        };
                        return self
                            .walk(&child, &segments[idx + 1..], walked, canonical)
                            .await;
                    }
                }
            }
            Ok(PageRef::from_node(node))
        })
    }

    fn apply_alias(&self, path: &str) -> String {
        for (prefix, target) in &self.aliases {
            if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                return format!("{target}{rest}");
            }
        }
        path.to_owned()
    }
}

/// Split a path into `/`-prefixed segments; `""` and `"/"` yield none.
fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| format!("/{s}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf(name: &str) -> NavNode {
        NavNode::new(name, Layout::Markdown(format!("# {name}")))
    }

    fn sample_root() -> NavNode {
        let utils = leaf("Utilities");
        let alpha = leaf("Alpha").with_route("/utils", RouteValue::Resolved(utils));
        leaf("Home").with_route("/alpha", RouteValue::Resolved(alpha))
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments(""), Vec::<String>::new());
        assert_eq!(split_segments("/"), Vec::<String>::new());
        assert_eq!(split_segments("/alpha"), vec!["/alpha"]);
        assert_eq!(split_segments("/alpha/utils"), vec!["/alpha", "/utils"]);
        assert_eq!(split_segments("/alpha/utils/"), vec!["/alpha", "/utils"]);
    }

    #[tokio::test]
    async fn test_resolve_root() {
        let router = Router::new(sample_root());
        let page = router.resolve("/").await.unwrap();
        assert_eq!(page.name, "Home");
        assert_eq!(page.children, vec!["/alpha"]);
    }

    #[tokio::test]
    async fn test_resolve_nested() {
        let router = Router::new(sample_root());
        let page = router.resolve("/alpha/utils").await.unwrap();
        assert_eq!(page.name, "Utilities");
        assert!(page.children.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_unknown_path() {
        let router = Router::new(sample_root());
        let err = router.resolve("/missing").await.unwrap_err();
        assert!(matches!(err, RouterError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_deferred_resolved_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let root = leaf("Home").with_route(
            "/api",
            RouteValue::deferred(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(leaf("API").with_route("/types", RouteValue::Resolved(leaf("Types"))))
                }
            }),
        );
        let router = Router::new(root);

        let first = router.resolve("/api").await.unwrap();
        assert_eq!(first.name, "API");
        let second = router.resolve("/api/types").await.unwrap();
        assert_eq!(second.name, "Types");
        assert_eq!(calls.load(Ordering::SeqCst), 1, "thunk must be cached");
    }

    #[tokio::test]
    async fn test_nested_deferred_subtrees() {
        let root = leaf("Home").with_route(
            "/api",
            RouteValue::deferred(|| async {
                Ok(leaf("API").with_route(
                    "/types",
                    RouteValue::deferred(|| async { Ok(leaf("Types")) }),
                ))
            }),
        );
        let router = Router::new(root);

        let page = router.resolve("/api/types").await.unwrap();
        assert_eq!(page.name, "Types");
        let again = router.resolve("/api/types").await.unwrap();
        assert_eq!(again.name, "Types");
    }

    #[tokio::test]
    async fn test_deferred_failure_surfaces() {
        let root = leaf("Home").with_route(
            "/api",
            RouteValue::deferred(|| async { Err(NavError::Deferred("fetch failed".to_owned())) }),
        );
        let router = Router::new(root);
        let err = router.resolve("/api").await.unwrap_err();
        assert!(matches!(err, RouterError::Nav(NavError::Deferred(_))));
    }

    #[tokio::test]
    async fn test_alias_rewrites_prefix() {
        let mut aliases = HashMap::new();
        aliases.insert("/schrodinger".to_owned(), "/alpha".to_owned());
        let router = Router::with_aliases(sample_root(), aliases);

        let page = router.resolve("/schrodinger/utils").await.unwrap();
        assert_eq!(page.name, "Utilities");
    }
}
