//! Navigation tree model, assembly and routing for Gallery.
//!
//! This crate provides:
//! - [`NavNode`]: the recursive navigation tree node
//! - [`RouteValue`]: resolved or lazily-deferred subtrees
//! - [`assemble_root`]: grafting chapter subtrees under their mount paths
//! - [`Router`]: path resolution with on-demand subtree evaluation
//!
//! # Laziness
//!
//! A route value may be [`RouteValue::Deferred`]: a thunk producing the
//! subtree asynchronously. Assembly never evaluates deferred values; the
//! [`Router`] evaluates them on first traversal and caches the result, so
//! a deep subtree (e.g. a generated API-documentation tree) is fetched
//! only when someone actually navigates there.

pub(crate) mod assemble;
pub(crate) mod node;
pub(crate) mod router;

pub use assemble::{ChapterMount, RootSpec, assemble_root};
pub use node::{DeferredNode, Layout, NavError, NavHeader, NavNode, NodeFuture, RouteValue, Routes};
pub use router::{PageRef, Router, RouterError};
