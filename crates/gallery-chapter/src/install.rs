//! Batched chapter installation.
//!
//! The whole chapter table is installed as one unit: every package load
//! is spawned together and the batch either fully resolves or fails.
//! A missing or broken chapter blocks the whole gallery from starting;
//! there is no per-chapter degradation.
//!
//! Progress events drive a loading indicator. On failure the `Done`
//! event is never emitted, so the indicator never completes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::chapter::InstalledChapter;
use crate::registry::{LoaderError, LoaderRegistry};
use crate::spec::{PackageSpec, SpecError};

/// Error aborting a batched install.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// A locator in the chapter table is malformed.
    #[error("invalid locator for chapter `{key}`")]
    Spec {
        key: String,
        #[source]
        source: SpecError,
    },
    /// A package failed to resolve or load.
    #[error("failed to install chapter `{key}`")]
    Load {
        key: String,
        #[source]
        source: LoaderError,
    },
    /// An install task was cancelled or panicked.
    #[error("install task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Progress notifications emitted during a batched install.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallEvent {
    /// The batch was issued.
    Started {
        /// Number of packages in the batch.
        count: usize,
    },
    /// One package finished loading.
    PackageLoaded {
        /// Navigation key of the loaded chapter.
        key: String,
    },
    /// One package failed; the batch is aborting.
    Failed {
        /// Navigation key of the failing chapter.
        key: String,
    },
    /// The whole batch resolved.
    Done,
}

/// Install every chapter in the table as one batched operation.
///
/// Loads run concurrently; the returned list is re-ordered to the
/// table's entry order. Fail-fast: the first failure aborts the batch.
///
/// # Errors
///
/// Returns the first [`InstallError`] encountered; no partial result is
/// produced.
pub async fn install_chapters(
    registry: &Arc<LoaderRegistry>,
    table: &[(String, String)],
    mut progress: impl FnMut(&InstallEvent),
) -> Result<Vec<InstalledChapter>, InstallError> {
    progress(&InstallEvent::Started { count: table.len() });

    let mut tasks = JoinSet::new();
    for (key, locator) in table {
        let spec = match PackageSpec::parse(locator) {
            Ok(spec) => spec,
            Err(source) => {
                progress(&InstallEvent::Failed { key: key.clone() });
                return Err(InstallError::Spec {
                    key: key.clone(),
                    source,
                });
            }
        };
        let registry = Arc::clone(registry);
        let key = key.clone();
        tasks.spawn(async move {
            tracing::debug!(key = %key, package = %spec, "loading chapter package");
            let result = registry.load(&spec).await;
            (key, result)
        });
    }

    let mut loaded = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        let (key, result) = joined?;
        match result {
            Ok(module) => {
                progress(&InstallEvent::PackageLoaded { key: key.clone() });
                loaded.insert(key, module);
            }
            Err(source) => {
                progress(&InstallEvent::Failed { key: key.clone() });
                tasks.abort_all();
                return Err(InstallError::Load { key, source });
            }
        }
    }
    progress(&InstallEvent::Done);

    // Back to table entry order; results arrive in completion order.
    Ok(table
        .iter()
        .filter_map(|(key, _)| {
            loaded
                .remove(key)
                .map(|module| InstalledChapter::new(key.clone(), module))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use gallery_links::LinkBundle;
    use gallery_nav::{Layout, NavError, NavNode};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chapter::{Chapter, NavArgs};
    use crate::registry::StaticLoader;
    use crate::spec::Version;

    struct StubChapter {
        title: String,
        links: LinkBundle,
    }

    impl StubChapter {
        fn arc(title: &str) -> Arc<dyn Chapter> {
            Arc::new(Self {
                title: title.to_owned(),
                links: LinkBundle::default(),
            })
        }
    }

    #[async_trait]
    impl Chapter for StubChapter {
        fn title(&self) -> &str {
            &self.title
        }

        fn abstract_md(&self) -> &str {
            "stub"
        }

        fn links(&self) -> &LinkBundle {
            &self.links
        }

        async fn navigation(&self, _args: NavArgs) -> Result<NavNode, NavError> {
            Ok(NavNode::new(&self.title, Layout::Markdown(String::new())))
        }
    }

    fn registry_with(packages: &[(&str, &str)]) -> Arc<LoaderRegistry> {
        let mut loader = StaticLoader::new();
        for (name, title) in packages {
            loader.register(*name, Version::new(0, 1, 0), StubChapter::arc(title));
        }
        let mut registry = LoaderRegistry::new();
        registry.register(Arc::new(loader));
        Arc::new(registry)
    }

    fn table(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[tokio::test]
    async fn test_install_preserves_table_order() {
        let registry = registry_with(&[("pkg-a", "Alpha"), ("pkg-b", "Beta")]);
        let table = table(&[("beta", "pkg-b#^0.1.0"), ("alpha", "pkg-a#^0.1.0")]);

        let chapters = install_chapters(&registry, &table, |_| {}).await.unwrap();

        let keys: Vec<_> = chapters.iter().map(InstalledChapter::key).collect();
        assert_eq!(keys, vec!["beta", "alpha"]);
    }

    #[tokio::test]
    async fn test_install_tags_mount_paths() {
        let registry = registry_with(&[("pkg-a", "Alpha")]);
        let table = table(&[("alpha", "pkg-a#^0.1.0")]);

        let chapters = install_chapters(&registry, &table, |_| {}).await.unwrap();

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].nav(), "/alpha");
        assert_eq!(chapters[0].title(), "Alpha");
    }

    #[tokio::test]
    async fn test_install_fails_fast_on_missing_package() {
        let registry = registry_with(&[("pkg-a", "Alpha")]);
        let table = table(&[("alpha", "pkg-a#^0.1.0"), ("ghost", "pkg-ghost#^0.1.0")]);

        let err = install_chapters(&registry, &table, |_| {}).await.unwrap_err();
        match err {
            InstallError::Load { key, .. } => assert_eq!(key, "ghost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_install_failure_never_emits_done() {
        let registry = registry_with(&[]);
        let table = table(&[("ghost", "pkg-ghost#^0.1.0")]);

        let mut events = Vec::new();
        let result = install_chapters(&registry, &table, |ev| events.push(ev.clone())).await;

        assert!(result.is_err());
        assert_eq!(events[0], InstallEvent::Started { count: 1 });
        assert!(events.contains(&InstallEvent::Failed {
            key: "ghost".to_owned()
        }));
        assert!(!events.contains(&InstallEvent::Done));
    }

    #[tokio::test]
    async fn test_install_success_event_sequence() {
        let registry = registry_with(&[("pkg-a", "Alpha"), ("pkg-b", "Beta")]);
        let table = table(&[("alpha", "pkg-a#^0.1.0"), ("beta", "pkg-b#^0.1.0")]);

        let mut events = Vec::new();
        install_chapters(&registry, &table, |ev| events.push(ev.clone()))
            .await
            .unwrap();

        assert_eq!(events.first(), Some(&InstallEvent::Started { count: 2 }));
        assert_eq!(events.last(), Some(&InstallEvent::Done));
        let loaded = events
            .iter()
            .filter(|ev| matches!(ev, InstallEvent::PackageLoaded { .. }))
            .count();
        assert_eq!(loaded, 2);
    }

    #[tokio::test]
    async fn test_install_rejects_bad_locator() {
        let registry = registry_with(&[]);
        let table = table(&[("bad", "#^0.1.0")]);

        let err = install_chapters(&registry, &table, |_| {}).await.unwrap_err();
        assert!(matches!(err, InstallError::Spec { .. }));
    }
}
