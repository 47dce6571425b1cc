//! Startup orchestration and home page composition for Gallery.
//!
//! [`bootstrap`] runs the whole startup sequence: batched chapter
//! install, link registry merge, navigation tree assembly, router
//! mount. The result is a [`Gallery`] handle the embedding application
//! (and the CLI) works against.

pub(crate) mod bootstrap;
pub(crate) mod home;

pub use bootstrap::{BootstrapError, Gallery, bootstrap};
pub use home::{apply_placeholders, compose_home_page, patch_abstract_with_link};
