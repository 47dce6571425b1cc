//! Merged process-wide link registry.
//!
//! Built exactly once at startup from the seed bundle plus every
//! installed chapter's bundle, in list order. Never mutated after the
//! merge. Lookups on unknown keys return `None` — an inert result the
//! rendering layer degrades on, never a failure — so a page with a dead
//! link still renders.

use std::fmt;
use std::sync::Arc;

use crate::bundle::LinkBundle;

/// The four resolvable link categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkCategory {
    /// External websites.
    External,
    /// API documentation.
    Api,
    /// Internal cross-chapter navigation.
    Cross,
    /// Source-repository references.
    GitHub,
}

impl LinkCategory {
    /// Widget name the markdown layer uses for this category.
    #[must_use]
    pub fn widget_name(self) -> &'static str {
        match self {
            Self::External => "ext-link",
            Self::Api => "api-link",
            Self::Cross => "cross-link",
            Self::GitHub => "github-link",
        }
    }

    /// All categories, in merge order.
    pub const ALL: [Self; 4] = [Self::External, Self::Api, Self::Cross, Self::GitHub];
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.widget_name())
    }
}

/// A resolved link target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkRef {
    /// Direct hyperlink.
    Href(String),
    /// Internal navigation reference (e.g. `@nav/alpha/foo`).
    Nav(String),
}

impl LinkRef {
    /// The href-equivalent target string.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Href(target) | Self::Nav(target) => target,
        }
    }
}

/// Process-wide merged link lookup.
///
/// Construct with [`LinkRegistry::build`]; the result is immutable.
#[derive(Debug, Default)]
pub struct LinkRegistry {
    merged: LinkBundle,
}

impl LinkRegistry {
    /// Merge the seed bundle and every chapter bundle, in list order.
    ///
    /// Later bundles overwrite earlier entries on key collision; no
    /// error is raised. Building twice from the same inputs yields the
    /// same resolver behavior.
    #[must_use]
    pub fn build<'a>(base: LinkBundle, bundles: impl IntoIterator<Item = &'a LinkBundle>) -> Self {
        let mut merged = base;
        for bundle in bundles {
            merged.merge_from(bundle);
        }
        Self { merged }
    }

    /// Resolve a key within a category.
    ///
    /// Returns `None` for unknown keys. Unresolved **external** lookups
    /// log a warning; the other categories stay silent.
    #[must_use]
    pub fn resolve(&self, category: LinkCategory, key: &str) -> Option<LinkRef> {
        let map = match category {
            LinkCategory::External => &self.merged.ext_links,
            LinkCategory::Api => &self.merged.api_links,
            LinkCategory::Cross => &self.merged.cross_links,
            LinkCategory::GitHub => &self.merged.github_links,
        };
        let Some(target) = map.get(key) else {
            if category == LinkCategory::External {
                tracing::warn!(key = %key, "unresolved external link");
            }
            return None;
        };
        Some(match category {
            LinkCategory::Api => LinkRef::Nav(target.clone()),
            _ => LinkRef::Href(target.clone()),
        })
    }

    /// Number of entries in a category.
    #[must_use]
    pub fn category_len(&self, category: LinkCategory) -> usize {
        match category {
            LinkCategory::External => self.merged.ext_links.len(),
            LinkCategory::Api => self.merged.api_links.len(),
            LinkCategory::Cross => self.merged.cross_links.len(),
            LinkCategory::GitHub => self.merged.github_links.len(),
        }
    }

    /// Iterate a category's entries in key order.
    pub fn category_entries(
        &self,
        category: LinkCategory,
    ) -> impl Iterator<Item = (&str, &str)> {
        let map = match category {
            LinkCategory::External => &self.merged.ext_links,
            LinkCategory::Api => &self.merged.api_links,
            LinkCategory::Cross => &self.merged.cross_links,
            LinkCategory::GitHub => &self.merged.github_links,
        };
        map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Per-category resolver callbacks for the markdown renderer.
    ///
    /// This is the extension-point value the embedding renderer takes in
    /// its configuration, replacing mutation of an ambient factory
    /// table.
    #[must_use]
    pub fn resolvers(self: &Arc<Self>) -> LinkResolvers {
        let mapper = |category: LinkCategory| -> LinkMapper {
            let registry = Arc::clone(self);
            Arc::new(move |key| registry.resolve(category, key))
        };
        LinkResolvers {
            ext: mapper(LinkCategory::External),
            api: mapper(LinkCategory::Api),
            cross: mapper(LinkCategory::Cross),
            github: mapper(LinkCategory::GitHub),
        }
    }
}

/// Resolver callback installed into the markdown renderer's
/// configuration for one link category.
pub type LinkMapper = Arc<dyn Fn(&str) -> Option<LinkRef> + Send + Sync>;

/// The four per-category resolver callbacks.
#[derive(Clone)]
pub struct LinkResolvers {
    ext: LinkMapper,
    api: LinkMapper,
    cross: LinkMapper,
    github: LinkMapper,
}

impl LinkResolvers {
    /// The mapper for a category.
    #[must_use]
    pub fn mapper(&self, category: LinkCategory) -> &LinkMapper {
        match category {
            LinkCategory::External => &self.ext,
            LinkCategory::Api => &self.api,
            LinkCategory::Cross => &self.cross,
            LinkCategory::GitHub => &self.github,
        }
    }
}
