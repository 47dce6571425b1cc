//! Root navigation tree assembly.
//!
//! Builds the root [`NavNode`] by awaiting each chapter's navigation
//! factory in list order and grafting the resulting subtree under the
//! chapter's mount path. Statically-defined routes (e.g. a contribute
//! page) are inserted first, so chapters may shadow them under the same
//! last-wins policy that applies between chapters.
//!
//! Deferred route values inside chapter subtrees are never evaluated
//! here; resolution happens in the [`Router`](crate::Router) on
//! traversal.

use crate::node::{Layout, NavError, NavHeader, NavNode, NodeFuture, RouteValue, Routes};

/// Static description of the root node.
pub struct RootSpec {
    /// Root display name (e.g. `"Home"`).
    pub name: String,
    /// Root header decoration.
    pub header: Option<NavHeader>,
    /// Root layout (the home page).
    pub layout: Layout,
    /// Routes defined by the application itself, outside any chapter.
    pub static_routes: Vec<(String, RouteValue)>,
}

/// A chapter subtree to graft: mount path plus the pending factory call.
pub struct ChapterMount {
    /// Mount path (`/` + navigation key).
    pub mount: String,
    /// The chapter's navigation factory invocation, not yet awaited.
    pub subtree: NodeFuture,
}

/// Assemble the root navigation node.
///
/// The fold over chapters is sequential in list order, so last-wins
/// collisions on duplicate mount paths are deterministic. A factory
/// failure aborts the whole assembly; there is no partial tree.
///
/// # Errors
///
/// Returns the first [`NavError`] produced by a chapter factory.
pub async fn assemble_root(
    root: RootSpec,
    chapters: Vec<ChapterMount>,
) -> Result<NavNode, NavError> {
    let mut routes = Routes::new();
    for (segment, value) in root.static_routes {
        routes.insert(segment, value);
    }

    for ChapterMount { mount, subtree } in chapters {
        tracing::debug!(mount = %mount, "resolving chapter navigation");
        let node = subtree.await?;
        if routes.insert(mount.clone(), RouteValue::Resolved(node)) {
            tracing::warn!(
                mount = %mount,
                "duplicate mount path, later chapter replaces earlier subtree"
            );
        }
    }

    Ok(NavNode {
        name: root.name,
        header: root.header,
        layout: root.layout,
        routes,
    })
}
