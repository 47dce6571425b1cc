//! Link bundles and the merged link registry for Gallery.
//!
//! Every chapter ships a [`LinkBundle`]: four independent maps (external,
//! API, cross-chapter, GitHub) from string keys to targets. At startup
//! the bundles are merged — in chapter list order, later entries winning
//! on key collision — into one [`LinkRegistry`], seeded from a static
//! base bundle.
//!
//! The registry is an explicit value, not ambient global state: the
//! embedding markdown renderer receives a [`LinkResolvers`] handle in
//! its configuration and calls back into it per link category.

pub(crate) mod bundle;
pub(crate) mod registry;

pub use bundle::{BundleError, LinkBundle};
pub use registry::{LinkCategory, LinkMapper, LinkRef, LinkRegistry, LinkResolvers};
