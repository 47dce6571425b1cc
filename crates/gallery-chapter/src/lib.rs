//! Chapter contract, plugin loaders and batched installation for Gallery.
//!
//! A chapter is an independently-versioned content unit contributing a
//! title, an abstract, a [`LinkBundle`](gallery_links::LinkBundle) and an
//! async navigation factory. Chapters are resolved through an explicit
//! [`LoaderRegistry`] of [`ChapterLoader`] implementations and installed
//! as one batched, fail-fast operation.

pub(crate) mod chapter;
pub(crate) mod context;
pub(crate) mod install;
pub(crate) mod registry;
pub(crate) mod spec;

pub use chapter::{Chapter, InstalledChapter, NavArgs};
pub use context::{ContextParams, RootContext};
pub use install::{InstallError, InstallEvent, install_chapters};
pub use registry::{ChapterLoader, LoaderError, LoaderRegistry, StaticLoader};
pub use spec::{PackageSpec, SpecError, Version, VersionReq};
