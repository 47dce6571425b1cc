//! Filesystem package scanning and loading.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use gallery_chapter::{Chapter, ChapterLoader, LoaderError, PackageSpec, Version};

use crate::chapter::ManifestChapter;
use crate::manifest::{MANIFEST_FILENAME, Manifest};

/// One scanned chapter package.
struct PackageEntry {
    name: String,
    version: Version,
    dir: PathBuf,
    manifest: Manifest,
}

/// Loader over a directory of chapter packages.
///
/// Scans once at construction: every subdirectory containing a
/// `chapter.toml` is indexed by package name and version. Malformed
/// packages are skipped with a warning rather than poisoning the whole
/// directory.
pub struct FsChapterLoader {
    packages: Vec<PackageEntry>,
}

impl FsChapterLoader {
    /// Scan a chapters directory.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Io`] when the directory itself cannot be
    /// read. Individual malformed packages are skipped, not fatal.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, LoaderError> {
        let root = root.into();
        let entries = std::fs::read_dir(&root).map_err(|source| LoaderError::Io {
            name: root.display().to_string(),
            source,
        })?;

        let mut packages = Vec::new();
        for entry in entries.flatten() {
            let dir = entry.path();
            let manifest_path = dir.join(MANIFEST_FILENAME);
            if !manifest_path.is_file() {
                continue;
            }
            let content = match std::fs::read_to_string(&manifest_path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %manifest_path.display(), error = %e, "skipping unreadable chapter package");
                    continue;
                }
            };
            let manifest = match Manifest::parse(&content) {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::warn!(path = %manifest_path.display(), error = %e, "skipping malformed chapter package");
                    continue;
                }
            };
            let version: Version = match manifest.package.version.parse() {
                Ok(version) => version,
                Err(e) => {
                    tracing::warn!(path = %manifest_path.display(), error = %e, "skipping chapter package with bad version");
                    continue;
                }
            };
            tracing::debug!(
                name = %manifest.package.name,
                version = %version,
                dir = %dir.display(),
                "indexed chapter package"
            );
            packages.push(PackageEntry {
                name: manifest.package.name.clone(),
                version,
                dir,
                manifest,
            });
        }

        Ok(Self { packages })
    }

    /// Number of indexed packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the scan found no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[async_trait]
impl ChapterLoader for FsChapterLoader {
    fn provides(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p.name == name)
    }

    async fn load(&self, spec: &PackageSpec) -> Result<Arc<dyn Chapter>, LoaderError> {
        let mut candidates: Vec<&PackageEntry> = self
            .packages
            .iter()
            .filter(|p| p.name == spec.name())
            .collect();
        if candidates.is_empty() {
            return Err(LoaderError::NotFound(spec.name().to_owned()));
        }
        candidates.sort_by_key(|p| p.version);
        if let Some(entry) = candidates
            .iter()
            .rev()
            .find(|p| spec.req().matches(p.version))
        {
            return Ok(Arc::new(ManifestChapter::new(&entry.manifest, &entry.dir)));
        }
        Err(LoaderError::NoMatchingVersion {
            name: spec.name().to_owned(),
            req: spec.req().to_string(),
            available: candidates
                .iter()
                .map(|p| p.version.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_package(root: &Path, dir_name: &str, name: &str, version: &str, title: &str) {
        let dir = root.join(dir_name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(MANIFEST_FILENAME),
            format!(
                r#"
[package]
name = "{name}"
version = "{version}"

[chapter]
title = "{title}"
abstract = "About {title}."

[nav]
name = "{title}"
layout = "home.md"
"#
            ),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_scan_and_load() {
        let dir = tempfile::tempdir().unwrap();
        write_package(dir.path(), "alpha", "@w3gallery/alpha", "0.1.2", "Alpha");
        write_package(dir.path(), "beta", "@w3gallery/beta", "0.2.0", "Beta");

        let loader = FsChapterLoader::new(dir.path()).unwrap();
        assert_eq!(loader.len(), 2);

        let spec = PackageSpec::parse("@w3gallery/alpha#^0.1.0").unwrap();
        let module = loader.load(&spec).await.unwrap();
        assert_eq!(module.title(), "Alpha");
        assert_eq!(module.abstract_md(), "About Alpha.");
    }

    #[tokio::test]
    async fn test_highest_matching_version_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_package(dir.path(), "alpha-old", "@w3gallery/alpha", "0.1.0", "Old");
        write_package(dir.path(), "alpha-new", "@w3gallery/alpha", "0.1.8", "New");
        write_package(dir.path(), "alpha-next", "@w3gallery/alpha", "0.2.0", "Next");

        let loader = FsChapterLoader::new(dir.path()).unwrap();
        let spec = PackageSpec::parse("@w3gallery/alpha#^0.1.0").unwrap();
        let module = loader.load(&spec).await.unwrap();
        assert_eq!(module.title(), "New");
    }

    #[tokio::test]
    async fn test_version_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_package(dir.path(), "alpha", "@w3gallery/alpha", "0.1.0", "Alpha");

        let loader = FsChapterLoader::new(dir.path()).unwrap();
        let spec = PackageSpec::parse("@w3gallery/alpha#^1.0.0").unwrap();
        let result = loader.load(&spec).await;
        assert!(matches!(
            result,
            Err(LoaderError::NoMatchingVersion { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_package_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_package(dir.path(), "alpha", "@w3gallery/alpha", "0.1.0", "Alpha");
        let broken = dir.path().join("broken");
        std::fs::create_dir_all(&broken).unwrap();
        std::fs::write(broken.join(MANIFEST_FILENAME), "not toml [").unwrap();

        let loader = FsChapterLoader::new(dir.path()).unwrap();
        assert_eq!(loader.len(), 1);
    }

    #[test]
    fn test_missing_directory() {
        let result = FsChapterLoader::new("/definitely/missing");
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }
}
