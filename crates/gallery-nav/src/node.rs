//! Navigation node model.
//!
//! A [`NavNode`] carries a display name, an optional header decoration,
//! a [`Layout`] describing the page content for the rendering layer, and
//! an insertion-ordered [`Routes`] map of child subtrees. Children may be
//! present immediately or deferred behind an async thunk.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future yielding a navigation subtree.
///
/// Produced by chapter navigation factories and deferred route thunks.
pub type NodeFuture = Pin<Box<dyn Future<Output = Result<NavNode, NavError>> + Send>>;

/// Error raised while producing a navigation subtree.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// A chapter navigation factory failed.
    #[error("navigation factory failed: {0}")]
    Factory(String),
    /// A deferred subtree failed to resolve.
    #[error("deferred route failed: {0}")]
    Deferred(String),
}

/// Decoration shown next to a node name in the navigation panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavHeader {
    /// Icon class understood by the rendering layer (e.g. `"fas fa-atom"`).
    pub icon: Option<String>,
}

impl NavHeader {
    /// Header with an icon class.
    #[must_use]
    pub fn icon(class: &str) -> Self {
        Self {
            icon: Some(class.to_owned()),
        }
    }
}

/// Page content contract handed to the out-of-scope rendering layer.
///
/// The gallery never renders content itself; a layout only carries what
/// the embedding renderer needs to produce the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Inline markdown source.
    Markdown(String),
    /// Markdown asset referenced by location, fetched by the renderer.
    Asset {
        /// Asset location, relative to the owning chapter's asset root.
        file: String,
    },
    /// Interactive widget page resolved by the renderer.
    Widget {
        /// Widget kind (e.g. `"notebook"`).
        kind: String,
        /// Widget source location.
        url: String,
    },
}

/// A child subtree: available now, or computed on first traversal.
#[derive(Clone, Debug)]
pub enum RouteValue {
    /// Subtree available immediately.
    Resolved(NavNode),
    /// Subtree produced by a thunk when the router first navigates into it.
    Deferred(DeferredNode),
}

impl RouteValue {
    /// Wrap an async thunk as a deferred route value.
    ///
    /// The thunk is re-invokable; the [`Router`](crate::Router) caches the
    /// first successful resolution so it normally runs at most once.
    pub fn deferred<F, Fut>(thunk: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<NavNode, NavError>> + Send + 'static,
    {
        Self::Deferred(DeferredNode(Arc::new(move || Box::pin(thunk()))))
    }
}

/// Re-invokable thunk producing a navigation subtree.
#[derive(Clone)]
pub struct DeferredNode(Arc<dyn Fn() -> NodeFuture + Send + Sync>);

impl DeferredNode {
    /// Evaluate the thunk.
    pub async fn resolve(&self) -> Result<NavNode, NavError> {
        (self.0)().await
    }
}

impl fmt::Debug for DeferredNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredNode(..)")
    }
}

/// Insertion-ordered route map with last-wins collision semantics.
///
/// Segments are normalized to start with `/`. Inserting an existing
/// segment replaces the value but keeps the original position, matching
/// object-spread merging in the reference design.
#[derive(Clone, Debug, Default)]
pub struct Routes {
    entries: Vec<(String, RouteValue)>,
}

impl Routes {
    /// Empty route map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, replacing any existing value at the same segment.
    ///
    /// Returns `true` when an existing segment was replaced.
    pub fn insert(&mut self, segment: impl Into<String>, value: RouteValue) -> bool {
        let segment = normalize_segment(segment.into());
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| *s == segment) {
            entry.1 = value;
            return true;
        }
        self.entries.push((segment, value));
        false
    }

    /// Look up a route by segment.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&RouteValue> {
        self.entries
            .iter()
            .find(|(s, _)| s == segment)
            .map(|(_, v)| v)
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteValue)> {
        self.entries.iter().map(|(s, v)| (s.as_str(), v))
    }

    /// Iterate segments in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }
}

/// Route segments always carry a leading slash.
fn normalize_segment(segment: String) -> String {
    if segment.starts_with('/') {
        segment
    } else {
        format!("/{segment}")
    }
}

/// A navigation tree node.
///
/// No children means a leaf page.
#[derive(Clone, Debug)]
pub struct NavNode {
    /// Display name.
    pub name: String,
    /// Optional header decoration.
    pub header: Option<NavHeader>,
    /// Page content for the rendering layer.
    pub layout: Layout,
    /// Child subtrees keyed by path segment.
    pub routes: Routes,
}

impl NavNode {
    /// Leaf node with a name and layout.
    #[must_use]
    pub fn new(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            header: None,
            layout,
            routes: Routes::new(),
        }
    }

    /// Set the header decoration.
    #[must_use]
    pub fn with_header(mut self, header: NavHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// Add a child route.
    #[must_use]
    pub fn with_route(mut self, segment: impl Into<String>, value: RouteValue) -> Self {
        self.routes.insert(segment, value);
        self
    }

    /// Whether this node is a leaf page.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.routes.is_empty()
    }
}
