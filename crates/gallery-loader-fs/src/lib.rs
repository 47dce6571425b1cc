//! Filesystem chapter-package loader for Gallery.
//!
//! A chapter package is a directory holding a `chapter.toml` manifest
//! plus markdown assets:
//!
//! ```toml
//! [package]
//! name = "@w3gallery/tdse-1d"
//! version = "0.1.3"
//!
//! [chapter]
//! title = "Schrödinger 1D"
//! abstract = "Time-dependent Schrödinger equation in one dimension."
//!
//! [links.cross]
//! "tdse-1d.utils" = "@nav/tdse-1d/utils"
//!
//! [nav]
//! name = "Schrödinger 1D"
//! icon = "fas fa-atom"
//! layout = "tdse-1d.md"
//! widget = "notebook"
//!
//! [[nav.routes]]
//! path = "/utils"
//! name = "Utilities"
//! layout = "tdse-1d.utils.md"
//! ```
//!
//! A route may point at a separate nav manifest instead of declaring
//! its subtree inline (`manifest = "api.nav.toml"`); that subtree is
//! loaded lazily, on first router traversal.

pub(crate) mod chapter;
pub(crate) mod loader;
pub(crate) mod manifest;

pub use chapter::ManifestChapter;
pub use loader::FsChapterLoader;
pub use manifest::{Manifest, ManifestError, NavEntry};
