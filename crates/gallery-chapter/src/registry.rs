//! Plugin loader registry.
//!
//! Chapter implementations are resolved through an explicit registry of
//! [`ChapterLoader`]s rather than ambient dynamic import resolution.
//! Loaders are consulted in registration order; the first one providing
//! the package name handles the load.

use std::sync::Arc;

use async_trait::async_trait;

use crate::chapter::Chapter;
use crate::spec::{PackageSpec, Version};

/// Error raised by a chapter loader.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// No registered loader provides the package.
    #[error("package not found: `{0}`")]
    NotFound(String),
    /// The package exists but no version satisfies the requirement.
    #[error("no version of `{name}` satisfies `{req}` (available: {available})")]
    NoMatchingVersion {
        name: String,
        req: String,
        available: String,
    },
    /// The package exists but its contents are unusable.
    #[error("invalid chapter package `{name}`: {message}")]
    Invalid { name: String, message: String },
    /// I/O failure while loading the package.
    #[error("failed to load `{name}`")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves package specs to chapter modules.
#[async_trait]
pub trait ChapterLoader: Send + Sync {
    /// Whether this loader can provide the named package.
    fn provides(&self, name: &str) -> bool;

    /// Load a chapter module satisfying the spec.
    async fn load(&self, spec: &PackageSpec) -> Result<Arc<dyn Chapter>, LoaderError>;
}

/// Registry of chapter loaders, consulted in registration order.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: Vec<Arc<dyn ChapterLoader>>,
}

impl LoaderRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader.
    pub fn register(&mut self, loader: Arc<dyn ChapterLoader>) {
        self.loaders.push(loader);
    }

    /// Resolve a spec through the first providing loader.
    ///
    /// # Errors
    ///
    /// [`LoaderError::NotFound`] when no loader provides the package;
    /// otherwise whatever the providing loader returns.
    pub async fn load(&self, spec: &PackageSpec) -> Result<Arc<dyn Chapter>, LoaderError> {
        for loader in &self.loaders {
            if loader.provides(spec.name()) {
                return loader.load(spec).await;
            }
        }
        Err(LoaderError::NotFound(spec.name().to_owned()))
    }
}

/// In-process loader over statically registered chapter modules.
///
/// The runtime counterpart of a package-manager install: modules are
/// registered up front under a package name and version, and the
/// highest version satisfying the requirement wins.
#[derive(Default)]
pub struct StaticLoader {
    packages: Vec<(String, Version, Arc<dyn Chapter>)>,
}

impl StaticLoader {
    /// Empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chapter module under a package name and version.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        version: Version,
        module: Arc<dyn Chapter>,
    ) {
        self.packages.push((name.into(), version, module));
    }
}

#[async_trait]
impl ChapterLoader for StaticLoader {
    fn provides(&self, name: &str) -> bool {
        self.packages.iter().any(|(n, _, _)| n == name)
    }

    async fn load(&self, spec: &PackageSpec) -> Result<Arc<dyn Chapter>, LoaderError> {
        let mut candidates: Vec<&(String, Version, Arc<dyn Chapter>)> = self
            .packages
            .iter()
            .filter(|(n, _, _)| n == spec.name())
            .collect();
        if candidates.is_empty() {
            return Err(LoaderError::NotFound(spec.name().to_owned()));
        }
        candidates.sort_by_key(|(_, v, _)| *v);
        if let Some((_, _, module)) = candidates
            .iter()
            .rev()
            .find(|(_, v, _)| spec.req().matches(*v))
        {
            return Ok(Arc::clone(module));
        }
        Err(LoaderError::NoMatchingVersion {
            name: spec.name().to_owned(),
            req: spec.req().to_string(),
            available: candidates
                .iter()
                .map(|(_, v, _)| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
